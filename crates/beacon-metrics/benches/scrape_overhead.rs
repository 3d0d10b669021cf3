//! Benchmark scrape cost
//!
//! A scrape runs on the request path, so it should stay well under a
//! millisecond with the default collectors.

use beacon_metrics::{parse_exposition, CollectorErrorPolicy, MetricsConfig, MetricsRegistry};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_scrape(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("runtime");
    let _guard = runtime.enter();

    let registry = MetricsRegistry::with_defaults(&MetricsConfig::default()).expect("registry");

    c.bench_function("gather_default_collectors", |b| {
        b.iter(|| black_box(registry.gather().expect("gather")))
    });

    c.bench_function("scrape_default_collectors", |b| {
        b.iter(|| black_box(registry.scrape().expect("scrape")))
    });

    let body = registry.scrape().expect("scrape").into_body();
    c.bench_function("parse_default_exposition", |b| {
        b.iter(|| black_box(parse_exposition(black_box(&body)).expect("parse")))
    });
}

fn bench_skip_policy(c: &mut Criterion) {
    // Outside a runtime both tokio collectors fail on every scrape.
    let config = MetricsConfig {
        on_collector_error: CollectorErrorPolicy::Skip,
        ..Default::default()
    };
    let registry = MetricsRegistry::with_defaults(&config).expect("registry");

    c.bench_function("scrape_with_skipped_collector", |b| {
        b.iter(|| black_box(registry.scrape().expect("scrape")))
    });
}

criterion_group!(benches, bench_scrape, bench_skip_policy);
criterion_main!(benches);
