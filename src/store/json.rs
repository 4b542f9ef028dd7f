use super::storage::{get_lock, read_registry, write_registry_unlocked, REGISTRY_FILENAME};
use super::types::RetentionRegistry;
use super::StoreError;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// File-backed policy and document store rooted at a data directory.
///
/// Reads go straight to disk. Mutations hold the registry lock across
/// read-modify-write and replace the registry file atomically, so a crash
/// mid-write leaves the previous version intact. The lock is shared by all
/// handles opened on the same directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonStore {
    #[must_use]
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let lock = get_lock(&root.join(REGISTRY_FILENAME));
        Self { root, lock }
    }

    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILENAME)
    }

    /// Snapshot of the whole registry.
    pub async fn read(&self) -> Result<RetentionRegistry, StoreError> {
        read_registry(&self.registry_path()).await
    }

    /// Replace the registry wholesale.
    pub async fn write(&self, registry: &RetentionRegistry) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        write_registry_unlocked(&self.registry_path(), registry).await
    }

    /// Run `f` against the registry under the lock and persist the result.
    /// Nothing is written when `f` fails.
    pub(super) async fn mutate<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut RetentionRegistry) -> Result<T, StoreError> + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;
        let path = self.registry_path();
        let mut registry = read_registry(&path).await?;
        let value = f(&mut registry)?;
        registry.updated_at = Utc::now();
        write_registry_unlocked(&path, &registry).await?;
        Ok(value)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
