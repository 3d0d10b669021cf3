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
//! Tokio runtime gauges

use prometheus::core::{Collector as _, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{IntGauge, Opts};
use tokio::runtime::Handle;

use crate::collector::Collector;
use crate::error::{MetricsError, MetricsResult};

/// Worker count, live tasks and global queue depth of the tokio runtime
/// the scrape runs on.
pub struct RuntimeCollector {
    workers: IntGauge,
    alive_tasks: IntGauge,
    global_queue_depth: IntGauge,
}

impl RuntimeCollector {
    /// Create the runtime gauges
    pub fn new() -> MetricsResult<Self> {
        let workers = IntGauge::with_opts(Opts::new(
            "tokio_runtime_workers",
            "Number of worker threads used by the runtime",
        ))?;
        let alive_tasks = IntGauge::with_opts(Opts::new(
            "tokio_runtime_alive_tasks",
            "Number of tasks currently alive in the runtime",
        ))?;
        let global_queue_depth = IntGauge::with_opts(Opts::new(
            "tokio_runtime_global_queue_depth",
            "Number of tasks waiting in the runtime's global queue",
        ))?;

        Ok(Self {
            workers,
            alive_tasks,
            global_queue_depth,
        })
    }
}

impl Collector for RuntimeCollector {
    fn name(&self) -> &'static str {
        "tokio_runtime"
    }

    fn descriptors(&self) -> Vec<&Desc> {
        let mut descs = self.workers.desc();
        descs.extend(self.alive_tasks.desc());
        descs.extend(self.global_queue_depth.desc());
        descs
    }

    fn collect(&self) -> MetricsResult<Vec<MetricFamily>> {
        let handle = Handle::try_current()
            .map_err(|e| MetricsError::collector(self.name(), e.to_string()))?;
        let metrics = handle.metrics();

        self.workers.set(metrics.num_workers() as i64);
        self.alive_tasks.set(metrics.num_alive_tasks() as i64);
        self.global_queue_depth.set(metrics.global_queue_depth() as i64);

        let mut families = self.workers.collect();
        families.extend(self.alive_tasks.collect());
        families.extend(self.global_queue_depth.collect());
        Ok(families)
    }
}
