//! Atomic replacement of the registry file.

use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `content` to `path` so readers see either the old or the new file,
/// never a partial one.
///
/// The temp file is created next to the target (rename must not cross
/// filesystems) and is removed automatically if any step fails.
pub async fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent directory"))?
        .to_path_buf();
    let target_path = path.to_path_buf();
    let bytes = content.as_bytes().to_vec();

    tokio::task::spawn_blocking(move || -> io::Result<()> {
        use std::io::Write;

        let mut temp_file = NamedTempFile::new_in(&parent)?;
        temp_file.write_all(&bytes)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&target_path)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_atomic_write_replaces_registry() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("retention.json");
        std::fs::write(&file_path, r#"{"schemaVersion":0}"#).unwrap();

        atomic_write(&file_path, r#"{"schemaVersion":1}"#).await.unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, r#"{"schemaVersion":1}"#);
    }

    #[tokio::test]
    async fn test_atomic_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("retention.json");

        atomic_write(&file_path, "{}").await.unwrap();
        atomic_write(&file_path, "{}").await.unwrap();

        let count = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(count, 1, "only the registry file should remain");
    }

    #[tokio::test]
    async fn test_atomic_write_missing_directory_fails() {
        let result = atomic_write(Path::new("/nonexistent/siam/retention.json"), "{}").await;
        assert!(result.is_err());
    }
}
