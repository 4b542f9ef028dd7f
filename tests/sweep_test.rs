#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_test_dir, init_store, utc};
use siam_retention::store::FileTransitionLog;
use siam_retention::sweep::SkipReason;
use siam_retention::{
    DocumentStatus, JsonStore, LogDispatcher, NewDocument, PolicyDraft, PolicyStore,
    RetentionAction, RetentionPolicy, RetentionSweepJob, StoreError,
};
use std::sync::Arc;

async fn create_policy(store: &JsonStore, name: &str, action: RetentionAction) -> RetentionPolicy {
    store
        .create_policy(
            PolicyDraft::new(name)
                .with_action(action)
                .notify_days_before(30),
        )
        .await
        .unwrap()
}

async fn register(store: &JsonStore, title: &str, policy: &RetentionPolicy) -> String {
    store
        .register_document(NewDocument::new(title, utc(2023, 1, 1)).with_policy(&policy.id))
        .await
        .unwrap()
        .id
}

fn sweep_job(store: &JsonStore, log: &FileTransitionLog) -> RetentionSweepJob {
    RetentionSweepJob::new(Arc::new(store.clone()), Arc::new(store.clone()))
        .with_transition_log(Arc::new(log.clone()))
        .with_dispatcher(Arc::new(LogDispatcher))
}

#[tokio::test]
async fn test_sweep_skips_document_with_removed_policy() {
    let temp_dir = create_test_dir();
    let store = init_store(&temp_dir).await;
    let log = FileTransitionLog::open(temp_dir.path());

    let delete = create_policy(&store, "Delete after a year", RetentionAction::Delete).await;
    let archive = create_policy(&store, "Archive after a year", RetentionAction::Archive).await;
    let doomed = create_policy(&store, "Retired", RetentionAction::Delete).await;
    let a = register(&store, "Loan agreement", &delete).await;
    let b = register(&store, "Account statement", &archive).await;
    let c = register(&store, "Old correspondence", &doomed).await;

    // Remove the policy behind the store's back to leave a dangling reference.
    let mut registry = store.read().await.unwrap();
    registry.policies.remove(&doomed.id);
    store.write(&registry).await.unwrap();

    let report = sweep_job(&store, &log).run_at(utc(2024, 1, 2)).await.unwrap();

    assert_eq!(report.scanned, 3);
    assert_eq!(report.transitions.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].document_id, c);
    assert_eq!(report.skipped[0].policy_id, doomed.id);
    assert_eq!(report.skipped[0].reason, SkipReason::PolicyNotFound);
    assert!(report.failed.is_empty());

    let status = |id: String| {
        let store = store.clone();
        async move { store.get_document(&id).await.unwrap().unwrap().status }
    };
    assert_eq!(status(a).await, DocumentStatus::Deleted);
    assert_eq!(status(b).await, DocumentStatus::Archived);
    assert_eq!(status(c).await, DocumentStatus::Active);
}

#[tokio::test]
async fn test_rerun_changes_nothing() {
    let temp_dir = create_test_dir();
    let store = init_store(&temp_dir).await;
    let log = FileTransitionLog::open(temp_dir.path());
    let review = create_policy(&store, "Review after a year", RetentionAction::Review).await;
    let id = register(&store, "Board minutes", &review).await;
    let job = sweep_job(&store, &log);
    let now = utc(2024, 1, 2);

    let first = job.run_at(now).await.unwrap();
    assert_eq!(first.transitions.len(), 1);
    let after_first = store.read().await.unwrap().documents;

    let second = job.run_at(now).await.unwrap();
    assert_eq!(second.scanned, 0, "expired documents are no longer active");
    assert!(second.transitions.is_empty());
    assert_eq!(store.read().await.unwrap().documents, after_first);

    let records = log.read_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].document_id, id);
    assert_eq!(records[0].from, DocumentStatus::Active);
    assert_eq!(records[0].to, DocumentStatus::Expired);
}

#[tokio::test]
async fn test_advance_notice_is_recorded_once_per_day() {
    let temp_dir = create_test_dir();
    let store = init_store(&temp_dir).await;
    let log = FileTransitionLog::open(temp_dir.path());
    let delete = create_policy(&store, "Delete after a year", RetentionAction::Delete).await;
    let id = register(&store, "Loan agreement", &delete).await;
    let job = sweep_job(&store, &log);

    let first = job.run_at(utc(2023, 12, 15)).await.unwrap();
    assert_eq!(first.notified, vec![id.clone()]);
    let doc = store.get_document(&id).await.unwrap().unwrap();
    assert_eq!(doc.last_notified_on, Some(utc(2023, 12, 15).date_naive()));
    assert_eq!(doc.status, DocumentStatus::Active);

    let same_day = job.run_at(utc(2023, 12, 15) + chrono::Duration::hours(12)).await.unwrap();
    assert!(same_day.notified.is_empty());

    let next_day = job.run_at(utc(2023, 12, 16)).await.unwrap();
    assert_eq!(next_day.notified, vec![id]);
    assert!(log.read_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_referenced_policy_cannot_be_deleted_until_reassigned() {
    let temp_dir = create_test_dir();
    let store = init_store(&temp_dir).await;
    let policy = create_policy(&store, "Archive after a year", RetentionAction::Archive).await;
    let id = register(&store, "Account statement", &policy).await;

    let err = store.delete_policy(&policy.id).await.unwrap_err();
    assert!(matches!(err, StoreError::PolicyInUse { documents: 1, .. }));

    let detached = store.assign_policy(&id, None).await.unwrap();
    assert!(detached.retention_expiry_date.is_none());
    store.delete_policy(&policy.id).await.unwrap();
    assert!(store.get_policy(&policy.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_survives_reopen() {
    let temp_dir = create_test_dir();
    let store = init_store(&temp_dir).await;
    let policy = create_policy(&store, "Delete after a year", RetentionAction::Delete).await;
    let id = register(&store, "Loan agreement", &policy).await;

    let reopened = JsonStore::open(temp_dir.path());
    let doc = reopened.get_document(&id).await.unwrap().unwrap();
    assert_eq!(doc.retention_expiry_date, Some(utc(2024, 1, 1)));
    assert_eq!(reopened.list_policies().await.unwrap(), vec![policy]);
}
