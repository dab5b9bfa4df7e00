//! Request freshness: the submitted timestamp must lie within a clock-skew
//! window of the server's current time, in either direction.

use chrono::{DateTime, Duration, Utc};

use crate::utils::timestamp::parse_timestamp;

pub const DEFAULT_FRESHNESS_WINDOW_SECS: i64 = 5 * 60;

pub fn default_window() -> Duration {
    Duration::seconds(DEFAULT_FRESHNESS_WINDOW_SECS)
}

/// `|now - timestamp| <= window`. Unparseable timestamps are never fresh.
pub fn is_fresh(timestamp: &str, now: DateTime<Utc>, window: Duration) -> bool {
    let Some(submitted) = parse_timestamp(timestamp) else {
        return false;
    };

    let skew = if now >= submitted {
        now - submitted
    } else {
        submitted - now
    };

    skew <= window
}
