//! Content date parsing for feed ordering.
//!
//! Content dates come from front matter and are free-form strings. Accepted
//! forms: RFC 3339 (`2024-01-15T10:30:00Z`, `2024-01-15T10:30:00+08:00`),
//! naive datetimes (`2024-01-15T10:30:00`, `2024-01-15 10:30:00`) and plain
//! dates (`2024-01-15`). Naive values are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Reverse;

/// Naive datetime layouts tried after RFC 3339.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a content date into milliseconds since the Unix epoch.
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Sort key placing dated items first, newest first, undated items last.
///
/// Use with a stable sort so that equal keys keep their input order.
pub fn newest_first_key(date: Option<&str>) -> (bool, Reverse<i64>) {
    match date.and_then(parse_timestamp) {
        Some(ts) => (false, Reverse(ts)),
        None => (true, Reverse(0)),
    }
}
