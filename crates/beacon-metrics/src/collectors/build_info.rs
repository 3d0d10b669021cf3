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
use prometheus::{IntGauge, Opts};

use crate::collector::Collector;
use crate::error::MetricsResult;

/// Constant `beacon_build_info` gauge labelled with the crate version.
pub struct BuildInfoCollector {
    info: IntGauge,
}

impl BuildInfoCollector {
    /// Gauge for the running build
    pub fn new() -> MetricsResult<Self> {
        let info = IntGauge::with_opts(
            Opts::new("beacon_build_info", "Build information, value is always 1")
                .const_label("version", env!("CARGO_PKG_VERSION")),
        )?;
        info.set(1);

        Ok(Self { info })
    }
}

impl Collector for BuildInfoCollector {
    fn name(&self) -> &'static str {
        "build_info"
    }

    fn descriptors(&self) -> Vec<&Desc> {
        self.info.desc()
    }

    fn collect(&self) -> MetricsResult<Vec<MetricFamily>> {
        Ok(self.info.collect())
    }
}
