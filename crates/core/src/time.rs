//! Absolute-time parsing for event timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{DomainError, DomainResult};

/// Point in time attached to every event.
pub type Timestamp = DateTime<Utc>;

/// Format emitted by the event producers, e.g. `2018-02-01T10:15:30.123456Z`.
///
/// The fraction is mandatory and holds 1 to [`MAX_FRACTION_DIGITS`] digits.
/// The trailing `Z` is matched literally and the value is read as UTC;
/// explicit offsets are not supported.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Microsecond precision, as produced upstream.
pub const MAX_FRACTION_DIGITS: usize = 6;

/// chrono's `%.f` takes any number of digits, so the fraction is checked first.
fn check_fraction(value: &str) -> DomainResult<()> {
    let digits = value
        .strip_suffix('Z')
        .and_then(|rest| rest.rsplit_once('.'))
        .map(|(_, digits)| digits)
        .unwrap_or_default();

    if (1..=MAX_FRACTION_DIGITS).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DomainError::malformed_timestamp(
            value,
            format!("expected 1 to {MAX_FRACTION_DIGITS} fractional digits before `Z`"),
        ))
    }
}

/// Parse a producer timestamp.
pub fn parse_timestamp(value: &str) -> DomainResult<Timestamp> {
    check_fraction(value)?;
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| DomainError::malformed_timestamp(value, e.to_string()))
}

/// Render a timestamp in the producer format (microsecond precision).
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
