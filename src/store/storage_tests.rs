use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_registry_reads_empty() {
    let dir = TempDir::new().unwrap();
    let registry = read_registry(&dir.path().join(REGISTRY_FILENAME))
        .await
        .unwrap();
    assert!(registry.policies.is_empty());
    assert!(registry.documents.is_empty());
    assert_eq!(registry.schema_version, crate::store::CURRENT_SCHEMA_VERSION);
}

#[tokio::test]
async fn test_write_then_read_registry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join(REGISTRY_FILENAME);
    let registry = RetentionRegistry::new();
    write_registry_unlocked(&path, &registry).await.unwrap();
    assert!(path.exists());
    let back = read_registry(&path).await.unwrap();
    assert_eq!(back, registry);
}

#[tokio::test]
async fn test_corrupt_registry_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(REGISTRY_FILENAME);
    std::fs::write(&path, "{not json").unwrap();
    let err = read_registry(&path).await.unwrap_err();
    assert!(matches!(err, StoreError::JsonError(_)));
}

#[test]
fn test_registry_file_names() {
    assert_eq!(REGISTRY_FILENAME, "retention.json");
    assert_eq!(TRANSITIONS_FILENAME, "transitions.jsonl");
}
