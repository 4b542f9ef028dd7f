//! Record stores consumed by the retention sweep.
//!
//! The sweep only depends on the [`PolicyStore`], [`DocumentStore`] and
//! [`TransitionLog`] traits. [`JsonStore`] keeps policies and documents in a
//! single registry file (`retention.json`) under the data directory;
//! [`FileTransitionLog`] appends lifecycle transitions to `transitions.jsonl`.

mod documents;
mod json;
mod policies;
mod storage;
mod transitions;
mod types;

pub use json::JsonStore;
pub use storage::{get_siam_home, REGISTRY_FILENAME, TRANSITIONS_FILENAME};
pub use transitions::FileTransitionLog;
pub use types::{RetentionRegistry, TransitionRecord, CURRENT_SCHEMA_VERSION};

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::document::Document;
use crate::retention::{PolicyDraft, PolicyError, PolicyUpdate, RetentionPolicy};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to determine home directory")]
    HomeDirNotFound,

    #[error("Retention policy not found: {0}")]
    PolicyNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(#[from] PolicyError),

    #[error("Retention policy {id} is referenced by {documents} documents. Reassign them first.")]
    PolicyInUse { id: String, documents: usize },

    #[error("Document {0} changed since it was read")]
    DocumentChanged(String),

    #[error("Retention expiry for document {0} is out of range")]
    ExpiryOutOfRange(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Administration of retention policies.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Get a policy by id; `Ok(None)` when it does not exist.
    async fn get_policy(&self, id: &str) -> Result<Option<RetentionPolicy>, StoreError>;

    /// List every policy, sorted by name.
    async fn list_policies(&self) -> Result<Vec<RetentionPolicy>, StoreError>;

    /// Validate and store a new policy.
    async fn create_policy(&self, draft: PolicyDraft) -> Result<RetentionPolicy, StoreError>;

    /// Apply a partial update. Documents referencing the policy get their
    /// cached expiry recomputed when the retention period changes.
    async fn update_policy(
        &self,
        id: &str,
        update: PolicyUpdate,
    ) -> Result<RetentionPolicy, StoreError>;

    /// Delete a policy. Fails with [`StoreError::PolicyInUse`] while any
    /// document still references it.
    async fn delete_policy(&self, id: &str) -> Result<(), StoreError>;

    /// Copy an existing policy under a new name and id.
    async fn clone_policy(&self, id: &str, new_name: &str) -> Result<RetentionPolicy, StoreError>;
}

/// The document operations the retention sweep needs.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents with status `active` and a retention policy assigned.
    async fn list_active_with_policy(&self) -> Result<Vec<Document>, StoreError>;

    /// Move a document from `change.from` to `change.to`.
    ///
    /// Fails with [`StoreError::DocumentChanged`] when the stored document no
    /// longer has status `change.from` or policy `change.policy_id`.
    async fn update_status(&self, change: &TransitionRecord) -> Result<(), StoreError>;

    /// Record that an advance notice was sent for `id` on `date`.
    async fn mark_notified(&self, id: &str, date: NaiveDate) -> Result<(), StoreError>;
}

/// Append-only record of lifecycle transitions.
#[async_trait]
pub trait TransitionLog: Send + Sync {
    async fn append(&self, record: &TransitionRecord) -> Result<(), StoreError>;
}
