//! First-run setup of the data directory.

use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::store::{
    FileTransitionLog, JsonStore, RetentionRegistry, StoreError, REGISTRY_FILENAME,
    TRANSITIONS_FILENAME,
};

/// What [`initialize`] had to create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitResult {
    /// Paths created, relative to the data directory (`.` for the directory itself).
    pub created: Vec<String>,
}

impl InitResult {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created.is_empty()
    }
}

/// Create the data directory, an empty registry and an empty transition log
/// when they are absent. Existing files are left untouched, so calling this
/// on every start is safe.
pub async fn initialize(data_dir: &Path) -> Result<InitResult, StoreError> {
    let mut result = InitResult::default();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).await?;
        result.created.push(".".to_string());
    }

    let store = JsonStore::open(data_dir);
    if !store.registry_path().exists() {
        store.write(&RetentionRegistry::new()).await?;
        result.created.push(REGISTRY_FILENAME.to_string());
    }

    let log = FileTransitionLog::open(data_dir);
    if !log.path().exists() {
        fs::write(log.path(), "").await?;
        result.created.push(TRANSITIONS_FILENAME.to_string());
    }

    if result.is_noop() {
        info!(data_dir = %data_dir.display(), "Data directory already initialized");
    } else {
        info!(
            data_dir = %data_dir.display(),
            created = ?result.created,
            "Initialized data directory"
        );
    }
    Ok(result)
}

#[cfg(test)]
#[path = "../init_tests.rs"]
mod tests;
