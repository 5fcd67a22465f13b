//! Storage port — the repository owning alarm status, arming status and sensors.

use catpoint_domain::error::CatpointError;
use catpoint_domain::sensor::{Sensor, SensorKey};
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// Authoritative store for everything the security service reads and writes.
///
/// The sensor set is keyed by [`SensorKey`]; implementations must never hold
/// two sensors with the same key.
pub trait StatusRepository {
    /// Current alarm status. A fresh repository reports [`AlarmStatus::NoAlarm`].
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the backing store fails.
    fn get_alarm_status(&self) -> Result<AlarmStatus, CatpointError>;

    /// Overwrite the alarm status.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the backing store fails.
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), CatpointError>;

    /// Current arming status. A fresh repository reports [`ArmingStatus::Disarmed`].
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the backing store fails.
    fn get_arming_status(&self) -> Result<ArmingStatus, CatpointError>;

    /// Overwrite the arming status.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the backing store fails.
    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), CatpointError>;

    /// All known sensors, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the backing store fails.
    fn get_sensors(&self) -> Result<Vec<Sensor>, CatpointError>;

    /// Insert a new sensor.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if the sensor is invalid or its
    /// key is already taken.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), CatpointError>;

    /// Store `sensor` under its key, replacing any sensor already stored there.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if the sensor is invalid, or a
    /// storage error.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), CatpointError>;

    /// Remove the sensor with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::NotFound`] if no sensor has that key.
    fn remove_sensor(&mut self, key: &SensorKey) -> Result<(), CatpointError>;
}
