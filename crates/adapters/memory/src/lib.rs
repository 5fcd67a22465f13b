//! # catpoint-adapter-memory
//!
//! In-memory implementation of the [`StatusRepository`] port.
//!
//! The sensor set is a [`BTreeMap`] keyed by [`SensorKey`], so uniqueness is
//! by name and type and iteration order is stable.
//!
//! ## Dependency rule
//!
//! Depends on `catpoint-app` (port traits) and `catpoint-domain` only.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use catpoint_app::ports::StatusRepository;
use catpoint_domain::error::{CatpointError, NotFoundError, ValidationError};
use catpoint_domain::sensor::{Sensor, SensorKey};
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// Repository that keeps all state in process memory.
#[derive(Debug, Default)]
pub struct MemoryStatusRepository {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: BTreeMap<SensorKey, Sensor>,
}

impl MemoryStatusRepository {
    /// Create an empty repository: no alarm, disarmed, no sensors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an initial sensor set.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if a sensor is invalid or two
    /// sensors share a key.
    pub fn with_sensors(sensors: impl IntoIterator<Item = Sensor>) -> Result<Self, CatpointError> {
        let mut repo = Self::new();
        for sensor in sensors {
            repo.add_sensor(sensor)?;
        }
        Ok(repo)
    }

}

impl StatusRepository for MemoryStatusRepository {
    fn get_alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), CatpointError> {
        self.alarm_status = status;
        Ok(())
    }

    fn get_arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), CatpointError> {
        self.arming_status = status;
        Ok(())
    }

    fn get_sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        Ok(self.sensors.values().cloned().collect())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), CatpointError> {
        sensor.validate()?;
        match self.sensors.entry(sensor.key()) {
            Entry::Occupied(entry) => {
                Err(ValidationError::DuplicateSensor(entry.key().to_string()).into())
            }
            Entry::Vacant(entry) => {
                tracing::debug!(sensor = %entry.key(), "sensor stored");
                entry.insert(sensor);
                Ok(())
            }
        }
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), CatpointError> {
        sensor.validate()?;
        self.sensors.insert(sensor.key(), sensor.clone());
        Ok(())
    }

    fn remove_sensor(&mut self, key: &SensorKey) -> Result<(), CatpointError> {
        self.sensors.remove(key).map(|_| ()).ok_or_else(|| {
            NotFoundError {
                entity: "Sensor",
                id: key.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catpoint_domain::sensor::SensorType;

    fn front_door() -> Sensor {
        Sensor::new("Front door", SensorType::Door)
    }

    #[test]
    fn should_start_with_no_alarm_and_disarmed() {
        let repo = MemoryStatusRepository::new();
        assert_eq!(repo.get_alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert_eq!(repo.get_arming_status().unwrap(), ArmingStatus::Disarmed);
        assert!(repo.get_sensors().unwrap().is_empty());
    }

    #[test]
    fn should_store_alarm_and_arming_status() {
        let mut repo = MemoryStatusRepository::new();
        repo.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();
        repo.set_arming_status(ArmingStatus::ArmedAway).unwrap();
        assert_eq!(repo.get_alarm_status().unwrap(), AlarmStatus::PendingAlarm);
        assert_eq!(repo.get_arming_status().unwrap(), ArmingStatus::ArmedAway);
    }

    #[test]
    fn should_return_sensors_ordered_by_key() {
        let repo = MemoryStatusRepository::with_sensors([
            Sensor::new("Window", SensorType::Window),
            Sensor::new("Attic", SensorType::Motion),
            front_door(),
        ])
        .unwrap();

        let names: Vec<String> = repo
            .get_sensors()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Attic", "Front door", "Window"]);
    }

    #[test]
    fn should_reject_duplicate_sensor_key() {
        let mut repo = MemoryStatusRepository::new();
        repo.add_sensor(front_door()).unwrap();

        let mut twin = front_door();
        twin.active = true;
        let result = repo.add_sensor(twin);

        assert!(matches!(
            result,
            Err(CatpointError::Validation(ValidationError::DuplicateSensor(_)))
        ));
        assert_eq!(repo.get_sensors().unwrap().len(), 1);
    }

    #[test]
    fn should_accept_same_name_with_different_type() {
        let repo = MemoryStatusRepository::with_sensors([
            Sensor::new("Back", SensorType::Door),
            Sensor::new("Back", SensorType::Window),
        ])
        .unwrap();
        assert_eq!(repo.get_sensors().unwrap().len(), 2);
    }

    #[test]
    fn should_reject_sensor_with_empty_name() {
        let result = MemoryStatusRepository::with_sensors([Sensor::new("", SensorType::Door)]);
        assert!(matches!(
            result,
            Err(CatpointError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_update_active_flag_of_stored_sensor() {
        let mut repo = MemoryStatusRepository::with_sensors([front_door()]).unwrap();
        let mut sensor = front_door();
        sensor.active = true;

        repo.update_sensor(&sensor).unwrap();

        assert!(repo.get_sensors().unwrap()[0].active);
    }

    #[test]
    fn should_store_unknown_sensor_on_update() {
        let mut repo = MemoryStatusRepository::new();
        let mut sensor = front_door();
        sensor.active = true;

        repo.update_sensor(&sensor).unwrap();

        assert_eq!(repo.get_sensors().unwrap(), vec![sensor]);
    }

    #[test]
    fn should_reject_update_of_sensor_with_empty_name() {
        let mut repo = MemoryStatusRepository::new();
        let result = repo.update_sensor(&Sensor::new(" ", SensorType::Window));
        assert!(matches!(
            result,
            Err(CatpointError::Validation(ValidationError::EmptyName))
        ));
        assert!(repo.get_sensors().unwrap().is_empty());
    }

    #[test]
    fn should_remove_sensor_by_key() {
        let mut repo = MemoryStatusRepository::with_sensors([front_door()]).unwrap();
        repo.remove_sensor(&front_door().key()).unwrap();
        assert!(repo.get_sensors().unwrap().is_empty());
    }

    #[test]
    fn should_return_not_found_when_removing_unknown_sensor() {
        let mut repo = MemoryStatusRepository::new();
        let result = repo.remove_sensor(&front_door().key());
        assert!(matches!(result, Err(CatpointError::NotFound(_))));
    }
}
