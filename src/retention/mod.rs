//! Retention policy engine.
//!
//! Everything in this module is pure: expiry calculation, the expiration and
//! notification predicates, and lifecycle status resolution. Storage and
//! scheduling live in [`crate::store`] and [`crate::sweep`].

pub mod calculator;
pub mod lifecycle;
pub mod policy;

pub use calculator::{
    calculate_expiry, is_expired, notification_window, should_notify, NotificationWindow,
};
pub use lifecycle::resolve_status;
pub use policy::{
    PolicyDraft, PolicyError, PolicyUpdate, RetentionAction, RetentionPolicy,
    DEFAULT_NOTIFY_DAYS_BEFORE, MAX_NOTIFY_DAYS_BEFORE, MAX_RETENTION_YEARS,
};
