use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .trim()
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Converts a unix timestamp in seconds to a UTC instant.
///
/// Zero and negative values are treated as absent, matching upstreams that report `0`
/// for "never updated".
pub fn unix_seconds_to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    if seconds <= 0 {
        return None;
    }
    Utc.timestamp_opt(seconds, 0).single()
}

/// Parses a human or machine formatted date into a UTC instant.
///
/// Accepts RFC 3339 (`2025-01-03T10:00:00Z`), plain dates (`2025-01-03`) and the
/// long/short month forms news sites print (`January 3, 2025`, `Jan 3, 2025`). Plain
/// dates resolve to midnight UTC.
///
/// # Arguments
/// - `value` - Raw date text
///
/// # Returns
/// - `Some(DateTime<Utc>)` - Parsed instant
/// - `None` - The text matches none of the accepted formats
pub fn parse_flexible_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
