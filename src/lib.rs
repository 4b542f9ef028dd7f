// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod config;
pub mod document;
pub mod init;
pub mod logging;
pub mod metrics;
pub mod notify;
pub mod retention;
pub mod store;
pub mod sweep;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, ConfigError, RetentionConfig};
pub use document::{Document, DocumentStatus, NewDocument};
pub use init::{initialize, InitResult};
pub use notify::{LogDispatcher, NotificationDispatcher, NotifyError, RetentionNotice};
pub use retention::{
    calculate_expiry, is_expired, notification_window, resolve_status, should_notify,
    NotificationWindow, PolicyDraft, PolicyError, PolicyUpdate, RetentionAction, RetentionPolicy,
};
pub use store::{
    DocumentStore, FileTransitionLog, JsonStore, PolicyStore, StoreError, TransitionLog,
    TransitionRecord,
};
pub use sweep::{run_periodic, RetentionSweepJob, ShutdownSignal, SweepError, SweepReport};
