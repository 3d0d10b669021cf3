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
//! Server configuration
//!
//! Defaults, then a TOML file, then `BEACON_*` environment variables. The
//! command line is applied on top by the binary.

use beacon_metrics::{CollectorErrorPolicy, MetricsConfig};
use beacon_observability::{LogConfig, LogFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "beacon.toml";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Logging settings
    pub log: LogSettings,

    /// Metrics settings
    pub metrics: MetricsConfig,
}

/// `[log]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive; `RUST_LOG` is used when unset
    pub level: Option<String>,

    /// One of pretty, compact, json
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: None,
            format: LogFormat::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log: LogSettings::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// Where [`ServerConfig::load`] read its values from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A TOML file
    File(PathBuf),
    /// No file was found; built-in defaults
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("defaults"),
        }
    }
}

impl ServerConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] in the working
    /// directory if it exists, then apply `BEACON_*` environment variables.
    pub fn load(path: Option<&Path>) -> ConfigResult<(Self, ConfigSource)> {
        Self::load_from(path, Path::new("."), |name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::load`], with the default file looked up in
    /// `default_dir` and variables read through `lookup`.
    ///
    /// A `path` that does not exist is an error; a missing default file is not.
    pub fn load_from<F>(
        path: Option<&Path>,
        default_dir: &Path,
        lookup: F,
    ) -> ConfigResult<(Self, ConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = match path {
            Some(path) => ConfigSource::File(path.to_path_buf()),
            None => {
                let default_path = default_dir.join(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    ConfigSource::File(default_path)
                } else {
                    ConfigSource::Defaults
                }
            }
        };

        let mut config = match &source {
            ConfigSource::File(path) => Self::from_file(path)?,
            ConfigSource::Defaults => Self::default(),
        };

        config.apply_overrides_from(lookup)?;
        Ok((config, source))
    }

    /// Parse a TOML file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply `BEACON_*` variables read through `lookup`
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("BEACON_HOST") {
            self.host = value;
        }
        if let Some(value) = lookup("BEACON_PORT") {
            self.port = value.parse().map_err(|_| {
                ConfigError::env_var_parsing(
                    "BEACON_PORT",
                    &value,
                    "expected valid port number (1-65535)",
                )
            })?;
        }
        if let Some(value) = lookup("BEACON_LOG_LEVEL") {
            self.log.level = Some(value);
        }
        if let Some(value) = lookup("BEACON_LOG_FORMAT") {
            self.log.format = value.parse::<LogFormat>().map_err(|e| {
                ConfigError::env_var_parsing("BEACON_LOG_FORMAT", &value, e.to_string())
            })?;
        }
        if let Some(value) = lookup("BEACON_METRICS_ON_ERROR") {
            self.metrics.on_collector_error =
                value.parse::<CollectorErrorPolicy>().map_err(|e| {
                    ConfigError::env_var_parsing("BEACON_METRICS_ON_ERROR", &value, e.to_string())
                })?;
        }
        Ok(())
    }

    /// Check the assembled configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid_value("host", "must not be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::invalid_value("port", "must be between 1 and 65535"));
        }
        self.metrics.validate()?;
        Ok(())
    }

    /// Logging configuration for the subscriber
    pub fn log_config(&self) -> LogConfig {
        let format = self.log.format;
        let mut config = LogConfig::new()
            .with_format(format)
            .with_color(format != LogFormat::Json);
        if let Some(level) = &self.log.level {
            config = config.with_level(level.clone());
        }
        config
    }

    /// Address to bind, `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
