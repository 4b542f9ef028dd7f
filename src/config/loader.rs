use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ConfigError, RetentionConfig, CONFIG_FILENAME};

/// Default config file location for `data_dir`.
#[must_use]
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILENAME)
}

/// Load the configuration at `path`.
///
/// Returns `Ok(RetentionConfig::default())` if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed,
/// or if the sweep interval is not a valid duration.
pub fn load_config(path: &Path) -> Result<RetentionConfig, ConfigError> {
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(RetentionConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: RetentionConfig = toml::from_str(&content)?;
    config.sweep.interval()?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
