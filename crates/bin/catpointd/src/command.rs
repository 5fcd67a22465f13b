//! Newline-delimited JSON commands read from stdin, and the status snapshot
//! written back after each one.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use catpoint_app::ports::{ImageAnalyzer, StatusRepository};
use catpoint_app::services::security_service::SecurityService;
use catpoint_domain::error::CatpointError;
use catpoint_domain::image::Image;
use catpoint_domain::sensor::{Sensor, SensorKey, SensorType};
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// One line of input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Change the arming status.
    Arm { status: ArmingStatus },
    /// Report a sensor's new activation state. Unknown sensors are registered.
    Sensor {
        name: String,
        sensor_type: SensorType,
        active: bool,
    },
    /// Run cat detection on the image file at `path`.
    Image { path: PathBuf },
    AddSensor {
        name: String,
        sensor_type: SensorType,
    },
    RemoveSensor {
        name: String,
        sensor_type: SensorType,
    },
    /// Print the snapshot without changing anything.
    Status,
}

/// Errors raised while reading or applying a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The line was not a valid command.
    #[error("malformed command")]
    Parse(#[from] serde_json::Error),
    /// The image file could not be read.
    #[error("failed to read image")]
    Io(#[from] std::io::Error),
    /// The security service rejected the command.
    #[error("command failed")]
    Domain(#[from] CatpointError),
}

/// Status written to stdout after every command.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub alarm_status: AlarmStatus,
    /// Occupant-facing label of `alarm_status`.
    pub alarm_description: &'static str,
    pub arming_status: ArmingStatus,
    /// Occupant-facing label of `arming_status`.
    pub arming_description: &'static str,
    pub sensors: Vec<Sensor>,
}

impl Snapshot {
    /// Read the current status through the service.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub fn capture<R: StatusRepository, A: ImageAnalyzer>(
        service: &SecurityService<R, A>,
    ) -> Result<Self, CatpointError> {
        let alarm_status = service.get_alarm_status()?;
        let arming_status = service.get_arming_status()?;
        Ok(Self {
            alarm_status,
            alarm_description: alarm_status.description(),
            arming_status,
            arming_description: arming_status.description(),
            sensors: service.get_sensors()?,
        })
    }
}

/// Parse one input line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns [`CommandError::Parse`] if the line is not a known command.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

/// Apply `command` to the service.
///
/// # Errors
///
/// Returns [`CommandError::Io`] if an image cannot be read, or
/// [`CommandError::Domain`] for anything the service rejects.
pub async fn apply<R: StatusRepository, A: ImageAnalyzer>(
    service: &mut SecurityService<R, A>,
    command: Command,
) -> Result<(), CommandError> {
    match command {
        Command::Arm { status } => service.set_arming_status(status)?,
        Command::Sensor {
            name,
            sensor_type,
            active,
        } => {
            let mut sensor = find_sensor(service, name, sensor_type)?;
            service.change_sensor_activation_status(&mut sensor, active)?;
        }
        Command::Image { path } => {
            let bytes = tokio::fs::read(&path).await?;
            service.process_image(&Image::from_bytes(bytes))?;
        }
        Command::AddSensor { name, sensor_type } => {
            service.add_sensor(Sensor::new(name, sensor_type))?;
        }
        Command::RemoveSensor { name, sensor_type } => {
            service.remove_sensor(&SensorKey::new(name, sensor_type))?;
        }
        Command::Status => {}
    }
    Ok(())
}

/// The stored sensor with this identity, or a fresh inactive one.
fn find_sensor<R: StatusRepository, A: ImageAnalyzer>(
    service: &SecurityService<R, A>,
    name: String,
    sensor_type: SensorType,
) -> Result<Sensor, CatpointError> {
    let key = SensorKey::new(name, sensor_type);
    let stored = service
        .get_sensors()?
        .into_iter()
        .find(|sensor| sensor.key() == key);
    Ok(stored.unwrap_or_else(|| Sensor::new(key.name, key.sensor_type)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catpoint_adapter_fake_image::FakeImageAnalyzer;
    use catpoint_adapter_memory::MemoryStatusRepository;

    fn make_service() -> SecurityService<MemoryStatusRepository, FakeImageAnalyzer> {
        let repo =
            MemoryStatusRepository::with_sensors([Sensor::new("Front door", SensorType::Door)])
                .unwrap();
        SecurityService::new(repo, FakeImageAnalyzer::always(true))
    }

    #[test]
    fn should_parse_arm_command() {
        let cmd = parse(r#"{"command":"arm","status":"armed_home"}"#).unwrap();
        assert_eq!(
            cmd,
            Some(Command::Arm {
                status: ArmingStatus::ArmedHome
            })
        );
    }

    #[test]
    fn should_parse_sensor_command() {
        let cmd = parse(
            r#"{"command":"sensor","name":"Front door","sensor_type":"door","active":true}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            Some(Command::Sensor {
                name: "Front door".to_string(),
                sensor_type: SensorType::Door,
                active: true,
            })
        );
    }

    #[test]
    fn should_skip_blank_line() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn should_reject_unknown_command() {
        assert!(matches!(
            parse(r#"{"command":"selfdestruct"}"#),
            Err(CommandError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn should_move_to_pending_when_sensor_trips_while_armed() {
        let mut svc = make_service();
        apply(
            &mut svc,
            Command::Arm {
                status: ArmingStatus::ArmedAway,
            },
        )
        .await
        .unwrap();

        apply(
            &mut svc,
            Command::Sensor {
                name: "Front door".to_string(),
                sensor_type: SensorType::Door,
                active: true,
            },
        )
        .await
        .unwrap();

        let snapshot = Snapshot::capture(&svc).unwrap();
        assert_eq!(snapshot.alarm_status, AlarmStatus::PendingAlarm);
        assert_eq!(snapshot.arming_status, ArmingStatus::ArmedAway);
        assert!(snapshot.sensors[0].active);
    }

    #[tokio::test]
    async fn should_register_unknown_sensor_on_activation() {
        let mut svc = make_service();
        apply(
            &mut svc,
            Command::Arm {
                status: ArmingStatus::ArmedHome,
            },
        )
        .await
        .unwrap();

        apply(
            &mut svc,
            Command::Sensor {
                name: "Garage".to_string(),
                sensor_type: SensorType::Door,
                active: true,
            },
        )
        .await
        .unwrap();

        let snapshot = Snapshot::capture(&svc).unwrap();
        assert_eq!(snapshot.alarm_status, AlarmStatus::PendingAlarm);
        assert_eq!(snapshot.sensors.len(), 2);
        assert!(snapshot.sensors.iter().any(|s| s.name == "Garage" && s.active));
    }

    #[tokio::test]
    async fn should_return_io_error_for_missing_image_file() {
        let mut svc = make_service();
        let result = apply(
            &mut svc,
            Command::Image {
                path: PathBuf::from("/nonexistent/catpoint/frame.jpg"),
            },
        )
        .await;
        assert!(matches!(result, Err(CommandError::Io(_))));
    }

    #[tokio::test]
    async fn should_add_and_remove_sensor() {
        let mut svc = make_service();
        apply(
            &mut svc,
            Command::AddSensor {
                name: "Hallway".to_string(),
                sensor_type: SensorType::Motion,
            },
        )
        .await
        .unwrap();
        assert_eq!(svc.get_sensors().unwrap().len(), 2);

        apply(
            &mut svc,
            Command::RemoveSensor {
                name: "Front door".to_string(),
                sensor_type: SensorType::Door,
            },
        )
        .await
        .unwrap();
        let sensors = svc.get_sensors().unwrap();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].name, "Hallway");
    }

    #[test]
    fn should_serialize_snapshot_as_snake_case() {
        let svc = make_service();
        let json = serde_json::to_value(Snapshot::capture(&svc).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "alarm_status": "no_alarm",
                "alarm_description": "Cool and Good",
                "arming_status": "disarmed",
                "arming_description": "Disarmed",
                "sensors": [{"name": "Front door", "sensor_type": "door", "active": false}],
            })
        );
    }
}
