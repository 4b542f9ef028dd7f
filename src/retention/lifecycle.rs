//! Lifecycle status resolution.
//!
//! Status is recomputed from the current document, policy and clock every
//! time rather than mutated incrementally, which keeps sweeps idempotent and
//! tolerant of missed runs.

use chrono::{DateTime, Utc};

use super::calculator::is_expired;
use super::policy::{RetentionAction, RetentionPolicy};
use crate::document::{Document, DocumentStatus};

/// Compute the status `document` should have at `now`.
///
/// A `deleted` document stays deleted. Without a policy or an expiry date,
/// or before expiry, the stored status is returned unchanged.
#[must_use]
pub fn resolve_status(
    document: &Document,
    policy: Option<&RetentionPolicy>,
    now: DateTime<Utc>,
) -> DocumentStatus {
    if document.status.is_terminal() {
        return document.status;
    }
    let Some(policy) = policy else {
        return document.status;
    };
    if !is_expired(document, now) {
        return document.status;
    }
    match policy.action {
        RetentionAction::Delete => DocumentStatus::Deleted,
        RetentionAction::Archive => DocumentStatus::Archived,
        RetentionAction::Review => DocumentStatus::Expired,
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
