//! Shared utilities for commands

use chrono::{DateTime, Local};

/// Format a millisecond Unix timestamp in local time
pub fn format_timestamp_ms(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
