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
//! Common types for metrics collection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{MetricsError, MetricsResult};

/// Type tag of a metric, as written on its `# TYPE` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Monotonically increasing value
    Counter,
    /// Value that can go up and down
    Gauge,
    /// Bucketed observations
    Histogram,
    /// Quantile observations
    Summary,
    /// No type information
    Untyped,
}

impl MetricKind {
    /// Token used in the exposition format
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
            MetricKind::Summary => "summary",
            MetricKind::Untyped => "untyped",
        }
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counter" => Ok(MetricKind::Counter),
            "gauge" => Ok(MetricKind::Gauge),
            "histogram" => Ok(MetricKind::Histogram),
            "summary" => Ok(MetricKind::Summary),
            "untyped" => Ok(MetricKind::Untyped),
            other => Err(format!("unknown metric type '{}'", other)),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One measurement from a scrape
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    /// Sample name, including any `_bucket`/`_sum`/`_count` suffix
    pub name: String,
    /// Label pairs in the order they were written
    pub labels: Vec<(String, String)>,
    /// Sample value
    pub value: f64,
    /// Type of the family the sample belongs to
    pub kind: MetricKind,
}

impl MetricSample {
    /// Value of a label, if present
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What a scrape does when a collector fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorErrorPolicy {
    /// Abort the scrape; the caller answers with a server error
    #[default]
    FailFast,
    /// Drop the failing collector's output and keep going
    Skip,
}

impl FromStr for CollectorErrorPolicy {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fail_fast" | "fail" => Ok(CollectorErrorPolicy::FailFast),
            "skip" => Ok(CollectorErrorPolicy::Skip),
            other => Err(MetricsError::InvalidConfig(format!(
                "unknown collector error policy '{}', expected fail_fast or skip",
                other
            ))),
        }
    }
}

/// Metrics settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Policy applied when a collector fails during a scrape
    pub on_collector_error: CollectorErrorPolicy,

    /// Sampling period of the scheduler lag monitor, in milliseconds
    pub scheduler_lag_resolution_ms: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            on_collector_error: CollectorErrorPolicy::FailFast,
            scheduler_lag_resolution_ms: 10,
        }
    }
}

impl MetricsConfig {
    /// Scheduler lag sampling period
    pub fn scheduler_lag_resolution(&self) -> Duration {
        Duration::from_millis(self.scheduler_lag_resolution_ms)
    }

    /// Reject settings the collectors cannot run with
    pub fn validate(&self) -> MetricsResult<()> {
        if self.scheduler_lag_resolution_ms == 0 {
            return Err(MetricsError::InvalidConfig(
                "scheduler_lag_resolution_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
