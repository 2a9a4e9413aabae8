//! Timestamps as the backend expects them: wall-clock time in Somalia
//! (UTC+3, no daylight saving) formatted `YYYY-MM-DD HH:MM:SS`.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::{Offset, TimeZone};

pub const SOMALIA_OFFSET: Offset = Offset::constant(3);
pub const BACKEND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an instant for the backend. Independent of the host time zone.
pub fn format_somalia_time(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::fixed(SOMALIA_OFFSET))
        .strftime(BACKEND_FORMAT)
        .to_string()
}

/// Inverse of [`format_somalia_time`], at second precision.
pub fn parse_somalia_time(text: &str) -> Result<Timestamp, jiff::Error> {
    let civil = DateTime::strptime(BACKEND_FORMAT, text.trim())?;
    SOMALIA_OFFSET.to_timestamp(civil)
}
