use chrono::{DateTime, Utc};

use crate::error::TypeError;

/// `strftime` pattern for the ISO-8601 rendering: second precision, literal
/// `Z`, no offset arithmetic.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Rebuild the process start time from `ac_btime`.
///
/// The kernel stores boot time plus the process's uptime at start, both
/// on the UTC clock, so the value is taken as-is with no timezone shift.
///
/// # Errors
///
/// Returns [`TypeError::TimestampOutOfRange`] when the value is beyond
/// what [`DateTime<Utc>`] can hold (roughly year 262 000).
pub fn starting_time(seconds: u64) -> Result<DateTime<Utc>, TypeError> {
  i64::try_from(seconds)
    .ok()
    .and_then(|secs| DateTime::from_timestamp(secs, 0))
    .ok_or(TypeError::TimestampOutOfRange { seconds })
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_iso8601(time: &DateTime<Utc>) -> String {
  time.format(ISO8601_FORMAT).to_string()
}

/// `serialize_with` adapter writing [`format_iso8601`] output.
pub(crate) fn serialize_iso8601<S: serde::Serializer>(
  time: &DateTime<Utc>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  serializer.collect_str(&time.format(ISO8601_FORMAT))
}
