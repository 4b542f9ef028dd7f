use super::*;
use crate::document::DocumentStatus;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

fn record(document_id: &str, to: DocumentStatus) -> TransitionRecord {
    TransitionRecord {
        document_id: document_id.to_string(),
        policy_id: "policy".to_string(),
        from: DocumentStatus::Active,
        to,
        at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_read_all_on_missing_log_is_empty() {
    let dir = TempDir::new().unwrap();
    let log = FileTransitionLog::open(dir.path());
    assert!(log.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_preserves_order() {
    let dir = TempDir::new().unwrap();
    let log = FileTransitionLog::open(dir.path());
    log.append(&record("a", DocumentStatus::Deleted)).await.unwrap();
    log.append(&record("b", DocumentStatus::Archived)).await.unwrap();

    let records = log.read_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].document_id, "a");
    assert_eq!(records[1].to, DocumentStatus::Archived);
}

#[tokio::test]
async fn test_one_json_object_per_line() {
    let dir = TempDir::new().unwrap();
    let log = FileTransitionLog::open(dir.path());
    log.append(&record("a", DocumentStatus::Expired)).await.unwrap();
    log.append(&record("b", DocumentStatus::Expired)).await.unwrap();

    let content = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.lines().all(|l| l.contains("\"documentId\"")));
}

#[tokio::test]
async fn test_append_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("fresh");
    let log = FileTransitionLog::open(&root);
    log.append(&record("a", DocumentStatus::Deleted)).await.unwrap();
    assert!(root.join(TRANSITIONS_FILENAME).exists());
}
