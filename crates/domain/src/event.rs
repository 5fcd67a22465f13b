//! Status event — an immutable record of something listeners care about.
//!
//! Events are produced whenever the alarm status is written, an image has
//! been analyzed, or a sensor's active flag changed.

use serde::{Deserialize, Serialize};

use crate::id::EventId;
use crate::status::AlarmStatus;
use crate::time::{Timestamp, now};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StatusEventKind {
    /// The alarm status was written with this value.
    AlarmStatusChanged(AlarmStatus),
    /// An image was analyzed; `true` when a cat was found.
    CatDetected(bool),
    /// At least one sensor was added, removed, or changed its active flag.
    SensorStatusChanged,
}

/// A timestamped [`StatusEventKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub id: EventId,
    pub kind: StatusEventKind,
    pub timestamp: Timestamp,
}

impl StatusEvent {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(kind: StatusEventKind) -> Self {
        Self {
            id: EventId::new(),
            kind,
            timestamp: now(),
        }
    }
}
