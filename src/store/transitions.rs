use super::storage::{get_lock, TRANSITIONS_FILENAME};
use super::types::TransitionRecord;
use super::{StoreError, TransitionLog};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Transition log stored as JSON lines next to the registry file.
#[derive(Debug, Clone)]
pub struct FileTransitionLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileTransitionLog {
    /// Log at `<root>/transitions.jsonl`.
    #[must_use]
    pub fn open(root: &Path) -> Self {
        let path = root.join(TRANSITIONS_FILENAME);
        let lock = get_lock(&path);
        Self { path, lock }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every recorded transition, oldest first.
    pub async fn read_all(&self) -> Result<Vec<TransitionRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl TransitionLog for FileTransitionLog {
    async fn append(&self, record: &TransitionRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let _guard = self.lock.lock().await;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "transitions_tests.rs"]
mod tests;
