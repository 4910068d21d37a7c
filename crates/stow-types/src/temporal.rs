//! UTC timestamps, the `Date` primitive kind.

use chrono::{DateTime, TimeZone, Utc};

/// A UTC instant stored as a `Date` primitive.
pub type Timestamp = DateTime<Utc>;

/// Current wall-clock time.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Build a timestamp from milliseconds since the UNIX epoch.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn from_millis(millis: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Milliseconds since the UNIX epoch.
pub fn to_millis(ts: &Timestamp) -> i64 {
    ts.timestamp_millis()
}
