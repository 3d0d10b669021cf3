// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Beacon Contributors

//! Integration tests for beacon-metrics
//!
//! Exercises the public API: default registry construction, scraping and
//! reading the exposition back.

use beacon_metrics::{
    CollectorErrorPolicy, MetricKind, MetricsConfig, MetricsRegistry, MetricsError,
};
use std::collections::BTreeSet;

fn default_registry() -> MetricsRegistry {
    MetricsRegistry::with_defaults(&MetricsConfig::default())
        .expect("default registry should build")
}

#[tokio::test]
async fn test_scrape_is_well_formed() {
    let exposition = default_registry().scrape().unwrap();

    assert!(exposition.content_type().starts_with("text/plain"));
    assert!(exposition.content_type().contains("version=0.0.4"));
    assert!(!exposition.body().is_empty());

    let samples = exposition.samples().unwrap();
    assert!(!samples.is_empty());
    assert!(samples.iter().any(|s| s.name.starts_with("process_")));
}

#[tokio::test]
async fn test_every_family_has_help_and_type() {
    let exposition = default_registry().scrape().unwrap();
    let body = exposition.body();

    let typed: BTreeSet<&str> = body
        .lines()
        .filter_map(|l| l.strip_prefix("# TYPE "))
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    let helped: BTreeSet<&str> = body
        .lines()
        .filter_map(|l| l.strip_prefix("# HELP "))
        .filter_map(|l| l.split_whitespace().next())
        .collect();

    assert!(!typed.is_empty());
    assert_eq!(typed, helped);
}

#[tokio::test]
async fn test_consecutive_scrapes_have_same_names() {
    let registry = default_registry();

    let first = registry.scrape().unwrap().metric_names().unwrap();
    let second = registry.scrape().unwrap().metric_names().unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_uptime_does_not_decrease() {
    let registry = default_registry();
    let uptime = |registry: &MetricsRegistry| {
        registry
            .scrape()
            .unwrap()
            .samples()
            .unwrap()
            .into_iter()
            .find(|s| s.name == "process_uptime_seconds")
            .map(|s| s.value)
            .unwrap()
    };

    let first = uptime(&registry);
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = uptime(&registry);

    assert!(second >= first);
}

#[tokio::test]
async fn test_build_info_sample() {
    let samples = default_registry().scrape().unwrap().samples().unwrap();
    let info = samples
        .iter()
        .find(|s| s.name == "beacon_build_info")
        .unwrap();

    assert_eq!(info.kind, MetricKind::Gauge);
    assert_eq!(info.value, 1.0);
    assert_eq!(info.label("version"), Some(env!("CARGO_PKG_VERSION")));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_linux_process_metrics_present() {
    let names = default_registry().scrape().unwrap().metric_names().unwrap();

    for expected in [
        "process_cpu_seconds_total",
        "process_resident_memory_bytes",
        "process_start_time_seconds",
        "process_open_fds",
    ] {
        assert!(names.contains(expected), "missing {}", expected);
    }
}

#[test]
fn test_default_registry_outside_runtime_fails_fast() {
    // The runtime collector needs a tokio runtime to read from.
    let registry = default_registry();
    assert_eq!(registry.policy(), CollectorErrorPolicy::FailFast);

    let err = registry.scrape().unwrap_err();
    assert!(matches!(
        err,
        MetricsError::Collector {
            collector: "tokio_runtime",
            ..
        }
    ));
}

#[test]
fn test_skip_policy_outside_runtime_still_scrapes() {
    let config = MetricsConfig {
        on_collector_error: CollectorErrorPolicy::Skip,
        ..Default::default()
    };
    let registry = MetricsRegistry::with_defaults(&config).unwrap();

    let names = registry.scrape().unwrap().metric_names().unwrap();
    assert!(names.contains("process_uptime_seconds"));
    assert!(!names.contains("tokio_runtime_workers"));
    assert!(!names.contains("tokio_runtime_scheduler_lag_seconds"));
}

#[test]
fn test_registry_thread_safety() {
    use std::thread;

    let config = MetricsConfig {
        on_collector_error: CollectorErrorPolicy::Skip,
        ..Default::default()
    };
    let registry = MetricsRegistry::with_defaults(&config).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    assert!(registry.scrape().is_ok());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
