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
//! Command line arguments

use beacon_observability::LogFormat;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::ServerConfig;

/// Demo API serving two JSON routes and Prometheus metrics
#[derive(Debug, Clone, Parser)]
#[command(name = "beacon-server", version, about)]
pub struct Cli {
    /// Configuration file (TOML). Defaults to ./beacon.toml when present
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log filter directive, e.g. "info" or "beacon_server=debug"
    #[arg(long, value_name = "DIRECTIVE")]
    pub log_level: Option<String>,

    /// Log output format: pretty, compact or json
    #[arg(long, value_name = "FORMAT", value_parser = LogFormat::from_str)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Override `config` with every flag that was given
    pub fn apply_to(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(level) = &self.log_level {
            config.log.level = Some(level.clone());
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["beacon-server"]);
        let mut config = ServerConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "beacon-server",
            "--config",
            "/etc/beacon.toml",
            "--host",
            "127.0.0.1",
            "-p",
            "8081",
            "--log-level",
            "debug",
            "--log-format",
            "compact",
        ]);
        let mut config = ServerConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(cli.config, Some(PathBuf::from("/etc/beacon.toml")));
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.log.format, LogFormat::Compact);
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let err = Cli::try_parse_from(["beacon-server", "--log-format", "xml"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let cli = Cli::try_parse_from(["beacon-server", "--log-format", "JSON"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["beacon-server", "--port", "70000"]).is_err());
    }
}
