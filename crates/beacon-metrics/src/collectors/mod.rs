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
//! Built-in collectors

mod build_info;
#[cfg(target_os = "linux")]
mod process;
mod runtime;
mod scheduler_lag;
mod uptime;

pub use build_info::BuildInfoCollector;
#[cfg(target_os = "linux")]
pub use process::ProcessCollector;
pub use runtime::RuntimeCollector;
pub use scheduler_lag::SchedulerLagCollector;
pub use uptime::UptimeCollector;
