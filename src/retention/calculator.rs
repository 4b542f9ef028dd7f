//! Expiry date and advance-notice arithmetic.

use chrono::{DateTime, Duration, Months, Utc};
use serde::Serialize;

use super::policy::RetentionPolicy;
use crate::document::Document;

/// Half-open interval `[start, end)` during which advance notice is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl NotificationWindow {
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

/// Advance `index_date` by `retention_years` calendar years.
///
/// The month and day are preserved; a Feb-29 date landing in a non-leap
/// year becomes Feb-28. Returns `None` only when the result falls outside
/// the representable date range.
#[must_use]
pub fn calculate_expiry(index_date: DateTime<Utc>, retention_years: u32) -> Option<DateTime<Utc>> {
    let months = retention_years.checked_mul(12)?;
    index_date.checked_add_months(Months::new(months))
}

/// Whether the document's retention period has elapsed at `now`.
///
/// Documents without an expiry date never expire, and a document is not
/// yet expired at the exact expiry instant.
#[must_use]
pub fn is_expired(document: &Document, now: DateTime<Utc>) -> bool {
    document
        .retention_expiry_date
        .is_some_and(|expiry| now > expiry)
}

/// The advance-notice window for `document` under `policy`, if any.
#[must_use]
pub fn notification_window(
    document: &Document,
    policy: &RetentionPolicy,
) -> Option<NotificationWindow> {
    let days = policy.notify_lead_days()?;
    let end = document.retention_expiry_date?;
    let lead = Duration::try_days(i64::from(days))?;
    let start = end.checked_sub_signed(lead)?;
    Some(NotificationWindow { start, end })
}

/// Whether staff should be notified about `document` at `now`.
///
/// True only inside `[expiry - notify_days_before days, expiry)`; once the
/// document has expired the action takes over and no notice is due.
#[must_use]
pub fn should_notify(document: &Document, policy: &RetentionPolicy, now: DateTime<Utc>) -> bool {
    notification_window(document, policy).is_some_and(|window| window.contains(now))
}

#[cfg(test)]
#[path = "calculator_tests.rs"]
mod tests;
