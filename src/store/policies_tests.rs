use super::*;
use crate::document::NewDocument;
use crate::retention::{PolicyError, RetentionAction};
use chrono::TimeZone;
use tempfile::TempDir;

fn store() -> (TempDir, JsonStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(dir.path());
    (dir, store)
}

#[tokio::test]
async fn test_create_and_get_policy() {
    let (_dir, store) = store();
    let created = store
        .create_policy(PolicyDraft::new("Loan files").with_retention_years(7))
        .await
        .unwrap();
    assert!(!created.id.is_empty());

    let fetched = store.get_policy(&created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn test_get_unknown_policy_is_none() {
    let (_dir, store) = store();
    assert_eq!(store.get_policy("missing").await.unwrap(), None);
}

#[tokio::test]
async fn test_create_rejects_invalid_policy() {
    let (_dir, store) = store();
    let err = store
        .create_policy(PolicyDraft::new("Bad").with_retention_years(0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::ValidationError(PolicyError::InvalidRetentionYears(0))
    ));
    assert!(store.list_policies().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_policies_sorted_by_name() {
    let (_dir, store) = store();
    store.create_policy(PolicyDraft::new("statements")).await.unwrap();
    store.create_policy(PolicyDraft::new("Board")).await.unwrap();
    store.create_policy(PolicyDraft::new("collateral")).await.unwrap();

    let names: Vec<String> = store
        .list_policies()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Board", "collateral", "statements"]);
}

#[tokio::test]
async fn test_update_policy_fields() {
    let (_dir, store) = store();
    let created = store.create_policy(PolicyDraft::new("Receipts")).await.unwrap();
    let updated = store
        .update_policy(
            &created.id,
            PolicyUpdate {
                action: Some(RetentionAction::Archive),
                notify_days_before: Some(14),
                ..PolicyUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.action, RetentionAction::Archive);
    assert_eq!(updated.notify_days_before, Some(14));
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_invalid_update_leaves_policy_untouched() {
    let (_dir, store) = store();
    let created = store.create_policy(PolicyDraft::new("Receipts")).await.unwrap();
    let err = store
        .update_policy(
            &created.id,
            PolicyUpdate {
                retention_years: Some(0),
                ..PolicyUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ValidationError(_)));
    let stored = store.get_policy(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.retention_years, 1);
}

#[tokio::test]
async fn test_update_unknown_policy_not_found() {
    let (_dir, store) = store();
    let err = store
        .update_policy("nope", PolicyUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::PolicyNotFound(_)));
}

#[tokio::test]
async fn test_changing_retention_years_recomputes_document_expiry() {
    let (_dir, store) = store();
    let policy = store.create_policy(PolicyDraft::new("Loans")).await.unwrap();
    let index = Utc.with_ymd_and_hms(2020, 2, 29, 0, 0, 0).unwrap();
    let doc = store
        .register_document(NewDocument::new("Note", index).with_policy(&policy.id))
        .await
        .unwrap();
    assert_eq!(
        doc.retention_expiry_date,
        Some(Utc.with_ymd_and_hms(2021, 2, 28, 0, 0, 0).unwrap())
    );

    store
        .update_policy(
            &policy.id,
            PolicyUpdate {
                retention_years: Some(4),
                ..PolicyUpdate::default()
            },
        )
        .await
        .unwrap();

    let doc = store.get_document(&doc.id).await.unwrap().unwrap();
    assert_eq!(
        doc.retention_expiry_date,
        Some(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn test_delete_unreferenced_policy() {
    let (_dir, store) = store();
    let policy = store.create_policy(PolicyDraft::new("Temp")).await.unwrap();
    store.delete_policy(&policy.id).await.unwrap();
    assert_eq!(store.get_policy(&policy.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_referenced_policy_is_blocked() {
    let (_dir, store) = store();
    let policy = store.create_policy(PolicyDraft::new("Loans")).await.unwrap();
    let index = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    store
        .register_document(NewDocument::new("Note", index).with_policy(&policy.id))
        .await
        .unwrap();

    let err = store.delete_policy(&policy.id).await.unwrap_err();
    match err {
        StoreError::PolicyInUse { id, documents } => {
            assert_eq!(id, policy.id);
            assert_eq!(documents, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.get_policy(&policy.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_unknown_policy_not_found() {
    let (_dir, store) = store();
    let err = store.delete_policy("ghost").await.unwrap_err();
    assert!(matches!(err, StoreError::PolicyNotFound(_)));
}

#[tokio::test]
async fn test_clone_policy_copies_rules_under_new_id() {
    let (_dir, store) = store();
    let source = store
        .create_policy(
            PolicyDraft::new("Statements")
                .with_retention_years(5)
                .with_action(RetentionAction::Delete)
                .notify_days_before(10),
        )
        .await
        .unwrap();
    let copy = store
        .clone_policy(&source.id, "Statements (copy)")
        .await
        .unwrap();

    assert_ne!(copy.id, source.id);
    assert_eq!(copy.name, "Statements (copy)");
    assert_eq!(copy.retention_years, 5);
    assert_eq!(copy.action, RetentionAction::Delete);
    assert_eq!(copy.notify_days_before, Some(10));
    assert_eq!(store.list_policies().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_clone_with_blank_name_rejected() {
    let (_dir, store) = store();
    let source = store.create_policy(PolicyDraft::new("Statements")).await.unwrap();
    let err = store.clone_policy(&source.id, " ").await.unwrap_err();
    assert!(matches!(err, StoreError::ValidationError(PolicyError::EmptyName)));
}
