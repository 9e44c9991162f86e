//! Calendar arithmetic on proleptic Gregorian date-times.

use crate::utils::error::{Result, UtilError};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Weekday};

const INVALID_DATE: &str = "Invalid date provided";

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses `YYYY-MM-DD`, an ISO date-time without offset, or an RFC 3339
/// timestamp. Offsets are dropped and the wall-clock time kept.
pub fn parse_date(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(date_time);
        }
    }

    DateTime::parse_from_rfc3339(text)
        .map(|date_time| date_time.naive_local())
        .map_err(|_| UtilError::invalid_date(INVALID_DATE))
}

/// Substitutes `YYYY`, `MM` and `DD` in `pattern` with the fields of `date`.
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> Result<String> {
    if pattern.trim().is_empty() {
        return Err(UtilError::invalid_format("Invalid format string"));
    }

    Ok(pattern
        .replace("YYYY", &format!("{:04}", date.year()))
        .replace("MM", &format!("{:02}", date.month()))
        .replace("DD", &format!("{:02}", date.day())))
}

/// Returns `date` moved by `days` calendar days; time of day is unchanged.
pub fn add_days(date: &NaiveDateTime, days: i64) -> Result<NaiveDateTime> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| UtilError::overflow("Resulting date is outside the supported range"))
}

/// Whole days from `from` to `to`, ignoring time of day. Positive when `to`
/// is later.
pub fn days_between(from: &NaiveDateTime, to: &NaiveDateTime) -> i64 {
    to.date().signed_duration_since(from.date()).num_days()
}

pub fn is_weekend(date: &NaiveDateTime) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
