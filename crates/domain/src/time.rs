//! Timestamps for status events.

use chrono::{DateTime, Utc};

/// UTC timestamp stamped on every [`StatusEvent`](crate::event::StatusEvent).
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
