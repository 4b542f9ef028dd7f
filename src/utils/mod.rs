mod atomic;

pub use atomic::atomic_write;

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a timestamp given either as RFC 3339 or as a plain `YYYY-MM-DD`
/// date (midnight UTC).
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let trimmed = input.trim();
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => Ok(date.and_time(chrono::NaiveTime::MIN).and_utc()),
            Err(_) => Err(rfc_err),
        },
    }
}

/// Format a path for display, replacing the home directory with `~`
#[must_use]
pub fn format_display_path(path: &std::path::Path) -> String {
    let display = path.to_string_lossy().to_string();
    match dirs::home_dir() {
        Some(home) => match path.strip_prefix(&home) {
            Ok(rest) => format!("~/{}", rest.to_string_lossy()),
            Err(_) => display,
        },
        None => display,
    }
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod tests;
