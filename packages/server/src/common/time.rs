//! Timestamp formatting for stored notes.

use chrono::{DateTime, Utc};

/// ISO-8601 layout used for `createdAt` / `updatedAt`: UTC, no offset suffix,
/// microsecond precision (e.g. `2025-03-01T09:15:02.123456`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current UTC instant in the stored timestamp layout
pub fn utc_timestamp() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}
