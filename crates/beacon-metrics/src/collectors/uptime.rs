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
use prometheus::core::{Collector as _, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Gauge, Opts};
use std::time::Instant;

use crate::collector::Collector;
use crate::error::MetricsResult;

/// Seconds since the collector was created.
pub struct UptimeCollector {
    started: Instant,
    uptime: Gauge,
}

impl UptimeCollector {
    /// Start counting from now
    pub fn new() -> MetricsResult<Self> {
        let uptime = Gauge::with_opts(Opts::new(
            "process_uptime_seconds",
            "Time since the metrics registry was created in seconds",
        ))?;

        Ok(Self {
            started: Instant::now(),
            uptime,
        })
    }
}

impl Collector for UptimeCollector {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn descriptors(&self) -> Vec<&Desc> {
        self.uptime.desc()
    }

    fn collect(&self) -> MetricsResult<Vec<MetricFamily>> {
        self.uptime.set(self.started.elapsed().as_secs_f64());
        Ok(self.uptime.collect())
    }
}
