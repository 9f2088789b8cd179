//! Date coercion for front-matter date fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::value::RawValue;

/// Naive date-time layouts, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, interpreted as UTC midnight. `%b %d %Y` is what the
/// project import tooling writes (`Mar 22 2001`).
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d %Y", "%B %d %Y", "%b %d, %Y", "%B %d, %Y"];

/// Coerce a raw value into a UTC date/time.
///
/// Accepts date strings in the layouts above plus RFC 3339 and RFC 2822,
/// integers and floats as milliseconds since the Unix epoch, and native
/// date/time values. Everything else, including empty strings, is rejected.
pub fn coerce_date(value: &RawValue) -> Option<DateTime<Utc>> {
    match value {
        RawValue::DateTime(dt) => Some(*dt),
        RawValue::String(s) => parse_date_str(s),
        RawValue::Integer(ms) => DateTime::from_timestamp_millis(*ms),
        RawValue::Float(ms) => from_float_millis(*ms),
        RawValue::Null | RawValue::Bool(_) | RawValue::Sequence(_) | RawValue::Mapping(_) => None,
    }
}

/// Parse a date string.
pub fn parse_date_str(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date.and_time(chrono::NaiveTime::MIN).and_utc());
        }
    }

    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[allow(clippy::cast_possible_truncation)]
fn from_float_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    let ms = ms.trunc();
    if ms < i64::MIN as f64 || ms > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64)
}
