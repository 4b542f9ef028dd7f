//! Advance notice of upcoming retention actions.
//!
//! The sweep hands a [`RetentionNotice`] to a [`NotificationDispatcher`] when
//! a document enters its notification window. Delivery channels beyond the
//! log (mail, chat) plug in behind the trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::document::Document;
use crate::retention::{RetentionAction, RetentionPolicy};

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification channel unavailable: {0}")]
    Unavailable(String),
}

/// What staff are told ahead of a retention action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionNotice {
    pub document_id: String,
    pub document_title: String,
    pub policy_id: String,
    pub policy_name: String,
    pub action: RetentionAction,
    pub expiry_date: DateTime<Utc>,
    /// Whole days left until the action is due, rounded down.
    pub days_remaining: i64,
}

impl RetentionNotice {
    /// Build a notice for `document`, or `None` when it has no expiry date.
    #[must_use]
    pub fn for_document(
        document: &Document,
        policy: &RetentionPolicy,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let expiry_date = document.retention_expiry_date?;
        Some(Self {
            document_id: document.id.clone(),
            document_title: document.title.clone(),
            policy_id: policy.id.clone(),
            policy_name: policy.name.clone(),
            action: policy.action,
            expiry_date,
            days_remaining: expiry_date.signed_duration_since(now).num_days(),
        })
    }
}

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notice: &RetentionNotice) -> Result<(), NotifyError>;
}

/// Dispatcher that records each notice as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(&self, notice: &RetentionNotice) -> Result<(), NotifyError> {
        info!(
            document_id = %notice.document_id,
            document_title = %notice.document_title,
            policy = %notice.policy_name,
            action = %notice.action,
            expiry_date = %notice.expiry_date.to_rfc3339(),
            days_remaining = notice.days_remaining,
            "Retention action approaching"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../notify_tests.rs"]
mod tests;
