use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::document::{Document, DocumentStatus};
use crate::retention::RetentionPolicy;

/// Current schema version of `retention.json`
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Policies and documents as stored in `retention.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RetentionRegistry {
    pub schema_version: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub policies: HashMap<String, RetentionPolicy>,
    #[serde(default)]
    pub documents: HashMap<String, Document>,
}

impl RetentionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            updated_at: Utc::now(),
            policies: HashMap::new(),
            documents: HashMap::new(),
        }
    }

    /// Number of documents referencing `policy_id`.
    #[must_use]
    pub fn policy_reference_count(&self, policy_id: &str) -> usize {
        self.documents
            .values()
            .filter(|d| d.retention_policy_id.as_deref() == Some(policy_id))
            .count()
    }
}

impl Default for RetentionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of `transitions.jsonl`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub document_id: String,
    pub policy_id: String,
    pub from: DocumentStatus,
    pub to: DocumentStatus,
    pub at: DateTime<Utc>,
}
