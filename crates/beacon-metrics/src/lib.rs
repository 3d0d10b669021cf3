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
//! Beacon Metrics Module
//!
//! Process-level metrics and their Prometheus text exposition.
//!
//! # Features
//!
//! - **Explicit registry**: collectors are built once and handed to
//!   [`MetricsRegistry::new`]; no global state
//! - **Default collectors**: process CPU, memory, file descriptors and start
//!   time (Linux), uptime, tokio runtime gauges, scheduler lag, build info
//! - **Deterministic output**: families appear in collector registration order
//! - **Failure policy**: a failing collector either aborts the scrape or is
//!   skipped, never half-written
//!
//! # Example
//!
//! ```ignore
//! use beacon_metrics::{MetricsConfig, MetricsRegistry};
//!
//! let registry = MetricsRegistry::with_defaults(&MetricsConfig::default())?;
//! let exposition = registry.scrape()?;
//! println!("{}", exposition.body());
//! ```

pub mod collector;
pub mod collectors;
pub mod error;
pub mod exposition;
pub mod registry;
pub mod types;

pub use collector::{default_collectors, Collector};
pub use error::{MetricsError, MetricsResult};
pub use exposition::{parse_exposition, Exposition};
pub use registry::MetricsRegistry;
pub use types::{CollectorErrorPolicy, MetricKind, MetricSample, MetricsConfig};

// Re-export prometheus types needed to implement collectors
pub use prometheus::core::Desc;
pub use prometheus::proto::MetricFamily;
