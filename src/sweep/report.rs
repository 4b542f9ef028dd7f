use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentStatus;
use crate::store::StoreError;

/// Failures that abort a sweep before any document is processed.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Failed to list documents: {0}")]
    ListDocuments(#[source] StoreError),

    #[error("Failed to list retention policies: {0}")]
    ListPolicies(#[source] StoreError),
}

/// A status change persisted during a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusTransition {
    pub document_id: String,
    pub policy_id: String,
    pub from: DocumentStatus,
    pub to: DocumentStatus,
}

/// Why a sweep left a document untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// The referenced policy does not exist.
    PolicyNotFound,
    /// Status or policy changed between listing and writing.
    DocumentChanged,
}

/// A document left untouched by a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedDocument {
    pub document_id: String,
    pub policy_id: String,
    pub reason: SkipReason,
}

/// A per-document failure that did not stop the sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepFailure {
    pub document_id: String,
    pub error: String,
}

/// Outcome of one sweep run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub run_id: String,
    pub swept_at: DateTime<Utc>,
    /// Documents examined (less than the candidate count when interrupted).
    pub scanned: usize,
    pub unchanged: usize,
    pub transitions: Vec<StatusTransition>,
    pub skipped: Vec<SkippedDocument>,
    pub failed: Vec<SweepFailure>,
    /// Documents an advance notice was dispatched for.
    pub notified: Vec<String>,
    pub notification_failures: Vec<SweepFailure>,
    pub interrupted: bool,
    pub duration_ms: u64,
}

impl SweepReport {
    #[must_use]
    pub fn new(run_id: String, swept_at: DateTime<Utc>) -> Self {
        Self {
            run_id,
            swept_at,
            scanned: 0,
            unchanged: 0,
            transitions: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            notified: Vec::new(),
            notification_failures: Vec::new(),
            interrupted: false,
            duration_ms: 0,
        }
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty() || !self.notification_failures.is_empty()
    }
}
