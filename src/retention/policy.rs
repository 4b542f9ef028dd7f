use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest retention period an administrator may configure.
pub const MAX_RETENTION_YEARS: u32 = 100;
/// Longest notification lead time an administrator may configure.
pub const MAX_NOTIFY_DAYS_BEFORE: u32 = 90;
/// Lead time applied to new policies when none is given.
pub const DEFAULT_NOTIFY_DAYS_BEFORE: u32 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Policy name must not be empty")]
    EmptyName,

    #[error("Invalid retention period {0} years. Must be between 1 and {MAX_RETENTION_YEARS}")]
    InvalidRetentionYears(u32),

    #[error("Invalid notification lead time {0} days. Must be at most {MAX_NOTIFY_DAYS_BEFORE}")]
    InvalidNotifyDays(u32),

    #[error("notifyDaysBefore is required when notifyBeforeAction is enabled")]
    MissingNotifyDays,

    #[error("notifyDaysBefore must not be set when notifyBeforeAction is disabled")]
    UnexpectedNotifyDays,

    #[error("Unknown retention action '{0}'. Allowed: review, archive, delete")]
    UnknownAction(String),
}

/// Terminal disposition once a document's retention period has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionAction {
    /// Staff must evaluate the document before final disposition.
    Review,
    /// Moved to long-term storage; still retrievable.
    Archive,
    /// Permanently removed.
    Delete,
}

impl RetentionAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RetentionAction::Review => "review",
            RetentionAction::Archive => "archive",
            RetentionAction::Delete => "delete",
        }
    }
}

impl fmt::Display for RetentionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetentionAction {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "review" => Ok(RetentionAction::Review),
            "archive" => Ok(RetentionAction::Archive),
            "delete" => Ok(RetentionAction::Delete),
            other => Err(PolicyError::UnknownAction(other.to_string())),
        }
    }
}

/// A named retention rule as stored by the policy store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPolicy {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub retention_years: u32,
    pub action: RetentionAction,
    pub notify_before_action: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_days_before: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RetentionPolicy {
    /// Check the policy invariants enforced at the store boundary.
    pub fn validate(&self) -> Result<(), PolicyError> {
        validate_fields(
            &self.name,
            self.retention_years,
            self.notify_before_action,
            self.notify_days_before,
        )
    }

    /// Lead time in days, or `None` when advance notice is disabled.
    #[must_use]
    pub fn notify_lead_days(&self) -> Option<u32> {
        if self.notify_before_action {
            self.notify_days_before
        } else {
            None
        }
    }
}

/// Fields supplied when creating a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDraft {
    pub name: String,
    pub description: Option<String>,
    pub retention_years: u32,
    pub action: RetentionAction,
    pub notify_before_action: bool,
    pub notify_days_before: Option<u32>,
}

impl PolicyDraft {
    /// Start a draft with the back-office defaults: one year, review,
    /// notify thirty days ahead.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            retention_years: 1,
            action: RetentionAction::Review,
            notify_before_action: true,
            notify_days_before: Some(DEFAULT_NOTIFY_DAYS_BEFORE),
        }
    }

    #[must_use]
    pub fn with_retention_years(mut self, years: u32) -> Self {
        self.retention_years = years;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: RetentionAction) -> Self {
        self.action = action;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Enable advance notice `days` before the action is due.
    #[must_use]
    pub fn notify_days_before(mut self, days: u32) -> Self {
        self.notify_before_action = true;
        self.notify_days_before = Some(days);
        self
    }

    /// Disable advance notice entirely.
    #[must_use]
    pub fn without_notification(mut self) -> Self {
        self.notify_before_action = false;
        self.notify_days_before = None;
        self
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        validate_fields(
            &self.name,
            self.retention_years,
            self.notify_before_action,
            self.notify_days_before,
        )
    }

    /// Materialize the draft into a stored policy.
    #[must_use]
    pub fn into_policy(self, id: String, now: DateTime<Utc>) -> RetentionPolicy {
        RetentionPolicy {
            id,
            name: self.name,
            description: self.description,
            retention_years: self.retention_years,
            action: self.action,
            notify_before_action: self.notify_before_action,
            notify_days_before: self.notify_days_before,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a policy. `None` leaves a field untouched.
///
/// `notify_days_before` is only consulted when `notify_before_action` is
/// `Some(true)` or notification is already enabled; disabling notification
/// clears the lead time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyUpdate {
    pub name: Option<String>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub retention_years: Option<u32>,
    pub action: Option<RetentionAction>,
    pub notify_before_action: Option<bool>,
    pub notify_days_before: Option<u32>,
}

impl PolicyUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the update to `policy` in place. The caller validates afterwards.
    pub fn apply(&self, policy: &mut RetentionPolicy, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            policy.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            policy.description = if description.is_empty() {
                None
            } else {
                Some(description.clone())
            };
        }
        if let Some(years) = self.retention_years {
            policy.retention_years = years;
        }
        if let Some(action) = self.action {
            policy.action = action;
        }
        if let Some(notify) = self.notify_before_action {
            policy.notify_before_action = notify;
            if !notify {
                policy.notify_days_before = None;
            }
        }
        if policy.notify_before_action {
            if let Some(days) = self.notify_days_before {
                policy.notify_days_before = Some(days);
            }
        }
        policy.updated_at = now;
    }
}

fn validate_fields(
    name: &str,
    retention_years: u32,
    notify_before_action: bool,
    notify_days_before: Option<u32>,
) -> Result<(), PolicyError> {
    if name.trim().is_empty() {
        return Err(PolicyError::EmptyName);
    }
    if retention_years == 0 || retention_years > MAX_RETENTION_YEARS {
        return Err(PolicyError::InvalidRetentionYears(retention_years));
    }
    match (notify_before_action, notify_days_before) {
        (true, None) => Err(PolicyError::MissingNotifyDays),
        (false, Some(_)) => Err(PolicyError::UnexpectedNotifyDays),
        (true, Some(days)) if days > MAX_NOTIFY_DAYS_BEFORE => {
            Err(PolicyError::InvalidNotifyDays(days))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
