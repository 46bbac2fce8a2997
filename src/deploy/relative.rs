//! Human-readable relative times ("3 days ago").

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Units from largest to smallest.
const UNITS: &[(i64, &str)] = &[
    (YEAR, "year"),
    (MONTH, "month"),
    (WEEK, "week"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
    (1, "second"),
];

/// Format `timestamp` relative to `now` using the largest whole unit.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use stackpulse::deploy::format_relative_time;
///
/// let now = Utc::now();
/// assert_eq!(format_relative_time(now - Duration::days(3), now), "3 days ago");
/// assert_eq!(format_relative_time(now + Duration::hours(1), now), "1 hour from now");
/// ```
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds();
    let suffix = if seconds < 0 { "from now" } else { "ago" };
    let magnitude = seconds.unsigned_abs() as i64;

    let (count, unit) = UNITS
        .iter()
        .find(|(size, _)| magnitude >= *size)
        .map(|(size, unit)| (magnitude / size, *unit))
        .unwrap_or((1, "second"));

    if count == 1 {
        format!("1 {} {}", unit, suffix)
    } else {
        format!("{} {}s {}", count, unit, suffix)
    }
}
