mod init;

pub use init::{init_logging, parse_rotation};

use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Log filename used by the engine.
pub const LOG_FILENAME: &str = "siam-retention.log";

/// Configuration for the logging system.
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl LogConfig {
    /// Defaults with logs under `<data_dir>/logs`.
    #[must_use]
    pub fn for_data_dir(data_dir: &Path) -> Self {
        Self {
            log_dir: data_dir.join("logs"),
            ..Self::default()
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        let log_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".siam")
            .join("logs");
        Self {
            log_dir,
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

#[cfg(test)]
#[path = "../logging_tests.rs"]
mod logging_tests;
