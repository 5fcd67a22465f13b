//! Sensor — a door, window or motion detector with a binary active flag.
//!
//! Sensors are identified by their [`SensorKey`] (name and type), never by
//! reference. Two sensors with the same key are the same sensor, whatever
//! their active flag says.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatpointError, ValidationError};

/// Kind of physical detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => f.write_str("door"),
            Self::Window => f.write_str("window"),
            Self::Motion => f.write_str("motion"),
        }
    }
}

/// Identity of a sensor within the sensor set.
///
/// Ordered by name first, then by type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SensorKey {
    pub name: String,
    pub sensor_type: SensorType,
}

impl SensorKey {
    #[must_use]
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            name: name.into(),
            sensor_type,
        }
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.sensor_type)
    }
}

/// A single detector and its current activation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub name: String,
    pub sensor_type: SensorType,
    #[serde(default)]
    pub active: bool,
}

impl Sensor {
    /// Create an inactive sensor.
    #[must_use]
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    /// The identity under which this sensor is stored.
    #[must_use]
    pub fn key(&self) -> SensorKey {
        SensorKey::new(self.name.clone(), self.sensor_type)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] when `name` is empty or blank.
    pub fn validate(&self) -> Result<(), CatpointError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}
