//! Common test utilities

use chrono::{DateTime, TimeZone, Utc};
use siam_retention::{initialize, JsonStore};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Midnight UTC on the given date
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

/// Initialize a data directory and open a store on it
#[allow(dead_code)] // Test utility for integration tests
pub async fn init_store(temp_dir: &TempDir) -> JsonStore {
    initialize(temp_dir.path())
        .await
        .expect("Failed to initialize data directory");
    JsonStore::open(temp_dir.path())
}
