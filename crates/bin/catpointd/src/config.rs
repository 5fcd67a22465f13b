//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `catpoint.toml` in the working directory (or the path in
//! `CATPOINT_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use catpoint_app::services::security_service::DEFAULT_CONFIDENCE_THRESHOLD;
use catpoint_domain::sensor::{Sensor, SensorType};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Cat detection settings.
    pub detection: DetectionConfig,
    /// Event bus settings.
    pub events: EventsConfig,
    /// Initial sensor set.
    pub sensors: Vec<SensorConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Cat detection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum confidence, in percent, for an image to count as a cat.
    pub confidence_threshold: f32,
}

/// Event bus configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity.
    pub capacity: usize,
}

/// One `[[sensors]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    pub sensor_type: SensorType,
}

impl SensorConfig {
    /// Build the inactive [`Sensor`] this entry describes.
    #[must_use]
    pub fn to_sensor(&self) -> Sensor {
        Sensor::new(self.name.clone(), self.sensor_type)
    }
}

impl Config {
    /// Load configuration from `catpoint.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CATPOINT_CONFIG").unwrap_or_else(|_| "catpoint.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CATPOINT_CONFIDENCE_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                self.detection.confidence_threshold = threshold;
            }
        }
        if let Ok(val) = std::env::var("CATPOINT_EVENT_CAPACITY") {
            if let Ok(capacity) = val.parse() {
                self.events.capacity = capacity;
            }
        }
        if let Ok(val) = std::env::var("CATPOINT_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.detection.confidence_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::Validation(format!(
                "confidence_threshold must be within 0..=100, got {threshold}"
            )));
        }
        if self.events.capacity == 0 {
            return Err(ConfigError::Validation(
                "event capacity must be non-zero".to_string(),
            ));
        }
        for sensor in &self.sensors {
            sensor
                .to_sensor()
                .validate()
                .map_err(|_| ConfigError::Validation("sensor name must not be empty".to_string()))?;
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "catpointd=info,catpoint=info".to_string(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
