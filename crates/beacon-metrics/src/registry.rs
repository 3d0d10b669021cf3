// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Metrics registry
//!
//! Owns the collector list, built once at startup and read-only afterwards.
//! A scrape walks the collectors in registration order and encodes the
//! result in the Prometheus text format.

use prometheus::proto::MetricFamily;
use prometheus::{Encoder, TextEncoder, TEXT_FORMAT};
use std::collections::{HashMap, HashSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::collector::{default_collectors, Collector};
use crate::error::{MetricsError, MetricsResult};
use crate::exposition::Exposition;
use crate::types::{CollectorErrorPolicy, MetricsConfig};

/// Registry of collectors serving scrapes.
///
/// Cheap to clone; clones share the same collectors.
#[derive(Clone)]
pub struct MetricsRegistry {
    inner: Arc<MetricsRegistryInner>,
}

struct MetricsRegistryInner {
    collectors: Vec<Box<dyn Collector>>,
    policy: CollectorErrorPolicy,
}

impl MetricsRegistry {
    /// Build a registry from a fixed collector list.
    ///
    /// Fails if two collectors share a name or describe the same metric.
    pub fn new(
        collectors: Vec<Box<dyn Collector>>,
        policy: CollectorErrorPolicy,
    ) -> MetricsResult<Self> {
        let mut names = HashSet::new();
        let mut owners: HashMap<String, &'static str> = HashMap::new();

        for collector in &collectors {
            if !names.insert(collector.name()) {
                return Err(MetricsError::DuplicateCollector(
                    collector.name().to_string(),
                ));
            }

            for desc in collector.descriptors() {
                if let Some(first) = owners.insert(desc.fq_name.clone(), collector.name()) {
                    return Err(MetricsError::DuplicateMetric {
                        metric: desc.fq_name.clone(),
                        first,
                        second: collector.name(),
                    });
                }
            }
        }

        info!(
            collectors = collectors.len(),
            metrics = owners.len(),
            policy = ?policy,
            "Metrics registry initialized"
        );

        Ok(Self {
            inner: Arc::new(MetricsRegistryInner { collectors, policy }),
        })
    }

    /// Registry with the default process collectors
    pub fn with_defaults(config: &MetricsConfig) -> MetricsResult<Self> {
        Self::new(default_collectors(config)?, config.on_collector_error)
    }

    /// Collector names in registration order
    pub fn collector_names(&self) -> Vec<&'static str> {
        self.inner.collectors.iter().map(|c| c.name()).collect()
    }

    /// Failure policy applied during scrapes
    pub fn policy(&self) -> CollectorErrorPolicy {
        self.inner.policy
    }

    /// Content type of [`MetricsRegistry::scrape`] output
    pub fn content_type(&self) -> &'static str {
        TEXT_FORMAT
    }

    /// Collect every metric family, in registration order
    pub fn gather(&self) -> MetricsResult<Vec<MetricFamily>> {
        let mut families = Vec::new();

        for collector in &self.inner.collectors {
            match collect_guarded(collector.as_ref()) {
                Ok(mut produced) => families.append(&mut produced),
                Err(e) => match self.inner.policy {
                    CollectorErrorPolicy::FailFast => return Err(e),
                    CollectorErrorPolicy::Skip => {
                        warn!(collector = collector.name(), error = %e, "Skipping failed collector");
                    }
                },
            }
        }

        Ok(families)
    }

    /// Produce a text snapshot of all metrics
    pub fn scrape(&self) -> MetricsResult<Exposition> {
        let families = self.gather()?;

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&families, &mut buffer)?;

        let body = String::from_utf8(buffer).map_err(|e| MetricsError::Encoding(e.to_string()))?;
        debug!(
            families = families.len(),
            bytes = body.len(),
            "Encoded metrics snapshot"
        );

        Ok(Exposition::new(body, TEXT_FORMAT))
    }
}

fn collect_guarded(collector: &dyn Collector) -> MetricsResult<Vec<MetricFamily>> {
    panic::catch_unwind(AssertUnwindSafe(|| collector.collect()))
        .unwrap_or_else(|_| Err(MetricsError::CollectorPanicked(collector.name())))
}
