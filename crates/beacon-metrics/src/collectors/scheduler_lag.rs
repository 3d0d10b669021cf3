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
//! Scheduler lag monitor
//!
//! A background task sleeps for a fixed resolution and records how late it
//! was woken. On a busy runtime the overshoot grows; on an idle one it stays
//! near zero.

use prometheus::core::{Collector as _, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, Opts};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::collector::Collector;
use crate::error::{MetricsError, MetricsResult};

/// Latest scheduling delay observed by the sampler.
///
/// The sampler runs on the runtime the collector was built in and stops when
/// the collector is dropped. Without a sampler there is no measurement, so
/// collecting fails rather than reporting zero.
pub struct SchedulerLagCollector {
    lag: Gauge,
    sampler: Option<AbortHandle>,
}

impl SchedulerLagCollector {
    /// Create the gauge and start sampling if a runtime is available
    pub fn new(resolution: Duration) -> MetricsResult<Self> {
        let lag = Gauge::with_opts(Opts::new(
            "tokio_runtime_scheduler_lag_seconds",
            "Delay between a timer's deadline and the task being polled, in seconds",
        ))?;

        let sampler = match Handle::try_current() {
            Ok(handle) => {
                let task = handle.spawn(sample_lag(lag.clone(), resolution));
                Some(task.abort_handle())
            }
            Err(_) => {
                debug!("No tokio runtime, scheduler lag sampling disabled");
                None
            }
        };

        Ok(Self { lag, sampler })
    }

    /// Whether the background sampler was started
    pub fn is_sampling(&self) -> bool {
        self.sampler.as_ref().is_some_and(|s| !s.is_finished())
    }
}

async fn sample_lag(lag: Gauge, resolution: Duration) {
    loop {
        let started = Instant::now();
        tokio::time::sleep(resolution).await;
        let overshoot = started.elapsed().saturating_sub(resolution);
        lag.set(overshoot.as_secs_f64());
    }
}

impl Collector for SchedulerLagCollector {
    fn name(&self) -> &'static str {
        "scheduler_lag"
    }

    fn descriptors(&self) -> Vec<&Desc> {
        self.lag.desc()
    }

    fn collect(&self) -> MetricsResult<Vec<MetricFamily>> {
        if self.sampler.is_none() {
            return Err(MetricsError::collector(
                self.name(),
                "scheduler lag sampler not running",
            ));
        }
        Ok(self.lag.collect())
    }
}

impl Drop for SchedulerLagCollector {
    fn drop(&mut self) {
        if let Some(sampler) = self.sampler.take() {
            sampler.abort();
        }
    }
}
