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
//! Process statistics read from procfs

use prometheus::core::{Collector as _, Desc};
use prometheus::proto::MetricFamily;

use crate::collector::Collector;
use crate::error::{MetricsError, MetricsResult};

/// CPU time, memory, file descriptors, start time and threads of this
/// process, as exported by the prometheus process collector.
pub struct ProcessCollector {
    inner: prometheus::process_collector::ProcessCollector,
}

impl ProcessCollector {
    /// Collector for the current process
    pub fn for_self() -> Self {
        Self {
            inner: prometheus::process_collector::ProcessCollector::for_self(),
        }
    }
}

impl Collector for ProcessCollector {
    fn name(&self) -> &'static str {
        "process"
    }

    fn descriptors(&self) -> Vec<&Desc> {
        self.inner.desc()
    }

    fn collect(&self) -> MetricsResult<Vec<MetricFamily>> {
        // The library swallows procfs errors and returns nothing.
        let families = self.inner.collect();
        if families.is_empty() {
            return Err(MetricsError::collector(
                self.name(),
                "process statistics unavailable",
            ));
        }
        Ok(families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_descriptors() {
        let collector = ProcessCollector::for_self();
        let names: Vec<&str> = collector
            .descriptors()
            .iter()
            .map(|d| d.fq_name.as_str())
            .collect();

        assert!(names.contains(&"process_cpu_seconds_total"));
        assert!(names.contains(&"process_resident_memory_bytes"));
        assert!(names.contains(&"process_open_fds"));
        assert!(names.contains(&"process_start_time_seconds"));
    }

    #[test]
    fn test_process_collect() {
        let collector = ProcessCollector::for_self();
        let families = collector.collect().unwrap();
        assert!(!families.is_empty());
    }
}
