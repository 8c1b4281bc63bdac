//! Row decoding helpers shared by the `SQLite` stores.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::errors::{DomainError, DomainResult};

/// Parse a stored timestamp.
///
/// Accepts RFC3339 (what the stores write) and `SQLite`'s
/// `YYYY-MM-DD HH:MM:SS` default, read as UTC.
pub fn parse_datetime(s: &str) -> DomainResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
        .map_err(|e| DomainError::Storage(format!("invalid timestamp '{s}': {e}")))
}
