//! Engine configuration loaded from `<data_dir>/config.toml`.
//!
//! The file is optional; missing sections and fields fall back to their
//! defaults. Command-line flags override whatever the file sets.

mod loader;

pub use loader::{config_path, load_config};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Config file name inside the data directory.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid sweep interval '{value}': {reason}")]
    InvalidInterval { value: String, reason: String },
}

fn default_interval() -> String {
    "24h".to_string()
}

fn default_true() -> bool {
    true
}

fn default_rotation() -> String {
    "daily".to_string()
}

/// `[sweep]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Period of the built-in scheduler, e.g. `"24h"` or `"30m"`.
    #[serde(default = "default_interval")]
    pub interval: String,
    /// Dispatch advance notices during sweeps.
    #[serde(default = "default_true")]
    pub notify: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            notify: true,
        }
    }
}

impl SweepConfig {
    /// Parse [`SweepConfig::interval`] as a humantime duration.
    pub fn interval(&self) -> Result<Duration, ConfigError> {
        parse_interval(&self.interval)
    }
}

/// `[logging]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
    /// `daily`, `hourly` or `never`.
    #[serde(default = "default_rotation")]
    pub rotation: String,
    /// Log directory; `<data_dir>/logs` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            rotation: default_rotation(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RetentionConfig {
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parse a humantime interval such as `"24h"`, `"90m"` or `"1day 12h"`.
pub fn parse_interval(value: &str) -> Result<Duration, ConfigError> {
    let interval =
        humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidInterval {
            value: value.to_string(),
            reason: e.to_string(),
        })?;
    if interval.is_zero() {
        return Err(ConfigError::InvalidInterval {
            value: value.to_string(),
            reason: "interval must be greater than zero".to_string(),
        });
    }
    Ok(interval)
}

#[cfg(test)]
#[path = "../config_tests.rs"]
mod tests;
