//! Elapsed time to display text.
//!
//! Everything here is pure: callers supply both the timestamp and the
//! current instant, so the thresholds can be checked without a page.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::TimestampError;
use crate::parser::parse_timestamp;

pub const MINUTE: i64 = 60;
pub const HOUR: i64 = 3_600;
pub const DAY: i64 = 86_400;
pub const WEEK: i64 = 604_800;

/// What a timed element should read, before rendering to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelativeTime {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
    /// Older than a week: the date portion of the original timestamp text.
    Date(String),
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeTime::JustNow => f.write_str("Just now"),
            RelativeTime::Minutes(count) => write_ago(f, *count, "minute"),
            RelativeTime::Hours(count) => write_ago(f, *count, "hour"),
            RelativeTime::Days(count) => write_ago(f, *count, "day"),
            RelativeTime::Date(date) => f.write_str(date),
        }
    }
}

// Plural only above one, so a count of 0 stays singular.
fn write_ago(f: &mut fmt::Formatter<'_>, count: i64, unit: &str) -> fmt::Result {
    let suffix = if count > 1 { "s" } else { "" };
    write!(f, "{} {}{} ago", count, unit, suffix)
}

/// Maps whole elapsed seconds onto the display thresholds.
///
/// `raw` is the timestamp text as written in the page; only the week-plus
/// branch uses it. Negative values (timestamps in the future) read "Just now".
pub fn describe_elapsed(elapsed_seconds: i64, raw: &str) -> RelativeTime {
    if elapsed_seconds < MINUTE {
        RelativeTime::JustNow
    } else if elapsed_seconds < HOUR {
        RelativeTime::Minutes(elapsed_seconds / MINUTE)
    } else if elapsed_seconds < DAY {
        RelativeTime::Hours(elapsed_seconds / HOUR)
    } else if elapsed_seconds < WEEK {
        RelativeTime::Days(elapsed_seconds / DAY)
    } else {
        RelativeTime::Date(date_portion(raw).to_string())
    }
}

/// Text up to the first space, or all of it when there is none.
///
/// ISO strings using `T` as the separator come back whole.
pub fn date_portion(raw: &str) -> &str {
    raw.split(' ').next().unwrap_or(raw)
}

/// Whole seconds from `then` to `now`, rounded toward negative infinity.
pub fn elapsed_seconds(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_milliseconds().div_euclid(1000)
}

/// Display text for `timestamp` as seen at `now`.
pub fn compute_display(timestamp: &str, now: DateTime<Utc>) -> Result<String, TimestampError> {
    let then = parse_timestamp(timestamp)?;
    Ok(describe_elapsed(elapsed_seconds(then, now), timestamp).to_string())
}
