//! Timestamp capture and ISO-8601 rendering for task records.
//!
//! Task timestamps are stored as text with millisecond precision and a `Z`
//! suffix (for example `2024-03-15T09:30:00.000Z`). Truncating at capture time
//! keeps in-memory values equal to what a persisted copy reads back as, and the
//! fixed-width format sorts lexicographically in storage.

use super::ParseTimestampError;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use mockable::Clock;

/// Returns the current instant truncated to millisecond precision.
#[must_use]
pub fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(3)
}

/// Renders a timestamp in the canonical storage and wire format.
#[must_use]
pub fn format(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a persisted RFC 3339 timestamp.
///
/// # Errors
///
/// Returns [`ParseTimestampError`] when the value is not valid RFC 3339.
pub fn parse(value: &str) -> Result<DateTime<Utc>, ParseTimestampError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| ParseTimestampError(value.to_owned()))
}
