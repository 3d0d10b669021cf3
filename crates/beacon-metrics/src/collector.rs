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
//! Collector capability and the default collector set

use prometheus::core::Desc;
use prometheus::proto::MetricFamily;

use crate::collectors::{
    BuildInfoCollector, RuntimeCollector, SchedulerLagCollector, UptimeCollector,
};
use crate::error::MetricsResult;
use crate::types::MetricsConfig;

/// A unit that produces metric families when asked.
///
/// Implementations are registered once, when the registry is built, and are
/// then called concurrently from scrape requests.
pub trait Collector: Send + Sync + 'static {
    /// Stable identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Descriptors of every metric this collector emits
    fn descriptors(&self) -> Vec<&Desc>;

    /// Current samples. The output is used whole or not at all.
    fn collect(&self) -> MetricsResult<Vec<MetricFamily>>;
}

/// Build the default process-level collectors, in scrape order.
///
/// The scheduler lag sampler is started when this runs inside a tokio
/// runtime.
pub fn default_collectors(config: &MetricsConfig) -> MetricsResult<Vec<Box<dyn Collector>>> {
    config.validate()?;

    let mut collectors: Vec<Box<dyn Collector>> = Vec::new();

    #[cfg(target_os = "linux")]
    collectors.push(Box::new(crate::collectors::ProcessCollector::for_self()));

    collectors.push(Box::new(UptimeCollector::new()?));
    collectors.push(Box::new(RuntimeCollector::new()?));
    collectors.push(Box::new(SchedulerLagCollector::new(
        config.scheduler_lag_resolution(),
    )?));
    collectors.push(Box::new(BuildInfoCollector::new()?));

    Ok(collectors)
}
