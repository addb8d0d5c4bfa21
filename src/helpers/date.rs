//! Date helper functions

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;

use crate::error::ValidationError;

/// Display format for publication dates, e.g. "15 Mar 2021"
pub const DISPLAY_FORMAT: &str = "%d %b %Y";

/// Parse an API instant.
///
/// Accepts RFC 3339 (`2021-03-15T00:00:00Z`) and the offset form the
/// content API emits (`2021-03-15T19:25:28+0000`).
pub fn parse_instant(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
}

/// Format an API instant for display in the given timezone
///
/// # Examples
/// ```ignore
/// format_display_date("2021-03-15T00:00:00Z", chrono_tz::UTC) // -> Ok("15 Mar 2021")
/// ```
pub fn format_display_date(value: &str, tz: Tz) -> Result<String, ValidationError> {
    let instant =
        parse_instant(value).ok_or_else(|| ValidationError::InvalidDate(value.to_string()))?;
    Ok(instant.with_timezone(&tz).format(DISPLAY_FORMAT).to_string())
}
