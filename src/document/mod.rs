//! Retention-relevant slice of a back-office document record.

mod status;

pub use status::{DocumentStatus, UnknownStatus};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A document as seen by the retention engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// When retention counting begins; distinct from the upload timestamp.
    pub index_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_policy_id: Option<String>,
    /// Cached `index_date + retention_years`; maintained by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_expiry_date: Option<DateTime<Utc>>,
    pub status: DocumentStatus,
    /// UTC date of the last advance notice sent for this document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_notified_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    #[must_use]
    pub fn has_policy(&self) -> bool {
        self.retention_policy_id.is_some()
    }

    #[must_use]
    pub fn was_notified_on(&self, date: NaiveDate) -> bool {
        self.last_notified_on == Some(date)
    }
}

/// Fields supplied when registering a document with the retention store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    pub tags: Vec<String>,
    pub index_date: DateTime<Utc>,
    pub retention_policy_id: Option<String>,
    pub status: DocumentStatus,
}

impl NewDocument {
    #[must_use]
    pub fn new(title: impl Into<String>, index_date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
            index_date,
            retention_policy_id: None,
            status: DocumentStatus::Active,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy_id: impl Into<String>) -> Self {
        self.retention_policy_id = Some(policy_id.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

#[cfg(test)]
#[path = "../document_tests.rs"]
mod tests;
