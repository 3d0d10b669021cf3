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
//! Error types for metrics collection

use thiserror::Error;

/// Errors raised while building the registry or producing a scrape
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Error from the prometheus library (metric construction, encoding)
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// A collector could not produce its samples
    #[error("Collector '{collector}' failed: {message}")]
    Collector {
        /// Name of the failing collector
        collector: &'static str,
        /// What went wrong
        message: String,
    },

    /// A collector panicked while producing its samples
    #[error("Collector '{0}' panicked during collection")]
    CollectorPanicked(&'static str),

    /// Two collectors were registered under the same name
    #[error("Collector already registered: {0}")]
    DuplicateCollector(String),

    /// Two collectors describe the same metric name
    #[error("Metric '{metric}' is emitted by both '{first}' and '{second}'")]
    DuplicateMetric {
        /// Fully qualified metric name
        metric: String,
        /// Collector registered first
        first: &'static str,
        /// Collector registered later
        second: &'static str,
    },

    /// Encoded output was not valid UTF-8
    #[error("Failed to encode metrics: {0}")]
    Encoding(String),

    /// Exposition text could not be parsed
    #[error("Invalid exposition text at line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Parser message
        reason: String,
    },

    /// Metrics configuration is unusable
    #[error("Invalid metrics configuration: {0}")]
    InvalidConfig(String),
}

impl MetricsError {
    /// Collector failure with a message
    pub fn collector(collector: &'static str, message: impl Into<String>) -> Self {
        MetricsError::Collector {
            collector,
            message: message.into(),
        }
    }
}

/// Result alias for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;
