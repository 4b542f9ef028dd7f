use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid status '{0}'. Allowed: active, pending, archived, expired, deleted")]
pub struct UnknownStatus(pub String);

/// Lifecycle status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Available and accessible.
    #[default]
    Active,
    /// Awaiting review/approval.
    Pending,
    /// Moved to long-term storage.
    Archived,
    /// Retention period elapsed, awaiting manual disposition.
    Expired,
    /// Marked for deletion. Terminal.
    Deleted,
}

impl DocumentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Active => "active",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Archived => "archived",
            DocumentStatus::Expired => "expired",
            DocumentStatus::Deleted => "deleted",
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == DocumentStatus::Deleted
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(DocumentStatus::Active),
            "pending" => Ok(DocumentStatus::Pending),
            "archived" => Ok(DocumentStatus::Archived),
            "expired" => Ok(DocumentStatus::Expired),
            "deleted" => Ok(DocumentStatus::Deleted),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
