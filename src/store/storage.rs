use super::types::RetentionRegistry;
use super::StoreError;
use crate::utils::atomic_write;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError};
use tokio::fs;
use tokio::sync::Mutex;

/// Registry file holding policies and documents
pub const REGISTRY_FILENAME: &str = "retention.json";
/// Append-only transition log
pub const TRANSITIONS_FILENAME: &str = "transitions.jsonl";

/// One lock per file, shared by every handle in the process.
static FILE_LOCKS: OnceLock<std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

/// Get the process-wide lock guarding `path`.
///
/// Handles opened separately on the same file get the same lock, so their
/// read-modify-write cycles never interleave.
pub fn get_lock(path: &Path) -> Arc<Mutex<()>> {
    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = FILE_LOCKS
        .get_or_init(|| std::sync::Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

/// Get the SIAM data directory (`~/.siam`).
///
/// If `SIAM_HOME` is set, that directory is used instead. This lets tests
/// and scheduled jobs point at an isolated store.
pub fn get_siam_home() -> Result<PathBuf, StoreError> {
    if let Ok(siam_home) = std::env::var("SIAM_HOME") {
        if !siam_home.is_empty() {
            return Ok(PathBuf::from(siam_home));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".siam"))
        .ok_or(StoreError::HomeDirNotFound)
}

/// Read the registry at `path`; a missing file reads as an empty registry.
pub async fn read_registry(path: &Path) -> Result<RetentionRegistry, StoreError> {
    if !path.exists() {
        return Ok(RetentionRegistry::new());
    }
    let content = fs::read_to_string(path).await?;
    let registry: RetentionRegistry = serde_json::from_str(&content)?;
    Ok(registry)
}

/// Write the registry atomically (caller must hold the store lock)
pub async fn write_registry_unlocked(
    path: &Path,
    registry: &RetentionRegistry,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(registry)?;
    atomic_write(path, &content).await?;
    Ok(())
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
