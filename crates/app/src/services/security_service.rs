//! Security service — the alarm state machine.
//!
//! Applies sensor, camera and arming events to the alarm status. The
//! service never stores status itself: every read and write goes through
//! the injected [`StatusRepository`].

use std::sync::Arc;

use catpoint_domain::error::CatpointError;
use catpoint_domain::event::{StatusEvent, StatusEventKind};
use catpoint_domain::image::Image;
use catpoint_domain::sensor::{Sensor, SensorKey};
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::ports::{ImageAnalyzer, StatusListener, StatusRepository};

/// Confidence (in percent) an image must reach to count as showing a cat.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Application service driving the alarm status.
pub struct SecurityService<R, A> {
    repo: R,
    analyzer: A,
    listeners: Vec<Arc<dyn StatusListener>>,
    confidence_threshold: f32,
    cat_detected: bool,
}

impl<R: StatusRepository, A: ImageAnalyzer> SecurityService<R, A> {
    /// Create a new service backed by the given repository and analyzer.
    pub fn new(repo: R, analyzer: A) -> Self {
        Self {
            repo,
            analyzer,
            listeners: Vec::new(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            cat_detected: false,
        }
    }

    /// Override the cat-detection confidence threshold.
    #[must_use]
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Read-only access to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Register a listener for every status event emitted from now on.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) {
        self.listeners.push(listener);
    }

    /// Remove a previously added listener, compared by pointer identity.
    pub fn remove_status_listener(&mut self, listener: &Arc<dyn StatusListener>) {
        self.listeners.retain(|l| !Arc::ptr_eq(l, listener));
    }

    /// # Errors
    ///
    /// Propagates repository failures.
    pub fn get_alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        self.repo.get_alarm_status()
    }

    /// # Errors
    ///
    /// Propagates repository failures.
    pub fn get_arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        self.repo.get_arming_status()
    }

    /// The current sensor set, read through to the repository.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub fn get_sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        self.repo.get_sensors()
    }

    /// Register a new sensor.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] for invalid or duplicate sensors,
    /// or a storage error from the repository.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<(), CatpointError> {
        sensor.validate()?;
        tracing::debug!(sensor = %sensor.key(), "adding sensor");
        self.repo.add_sensor(sensor)?;
        self.publish(StatusEventKind::SensorStatusChanged);
        Ok(())
    }

    /// Unregister a sensor.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::NotFound`] if no sensor has `key`, or a
    /// storage error from the repository.
    pub fn remove_sensor(&mut self, key: &SensorKey) -> Result<(), CatpointError> {
        tracing::debug!(sensor = %key, "removing sensor");
        self.repo.remove_sensor(key)?;
        self.publish(StatusEventKind::SensorStatusChanged);
        Ok(())
    }

    /// Change the arming status.
    ///
    /// Disarming clears the alarm. Arming resets every sensor to inactive,
    /// and arming at home while the last image showed a cat raises the alarm.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), CatpointError> {
        tracing::info!(arming_status = %status, "changing arming status");
        self.repo.set_arming_status(status)?;
        if status.is_armed() {
            self.deactivate_all_sensors()?;
            if status == ArmingStatus::ArmedHome && self.cat_detected {
                self.set_alarm_status(AlarmStatus::Alarm)?;
            }
        } else {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }
        Ok(())
    }

    /// Apply a sensor event: set `sensor`'s active flag and move the alarm
    /// status accordingly.
    ///
    /// The new flag is persisted before any alarm status is written. A sensor
    /// the repository does not hold yet is stored as part of the update. The
    /// caller's `sensor` only changes once the repository accepted it.
    ///
    /// # Errors
    ///
    /// Propagates repository failures; `sensor` is left untouched then.
    pub fn change_sensor_activation_status(
        &mut self,
        sensor: &mut Sensor,
        active: bool,
    ) -> Result<(), CatpointError> {
        let was_active = sensor.active;
        let alarm = self.repo.get_alarm_status()?;
        let arming = self.repo.get_arming_status()?;

        let updated = Sensor {
            active,
            ..sensor.clone()
        };
        self.repo.update_sensor(&updated)?;
        *sensor = updated;
        if was_active != active {
            self.publish(StatusEventKind::SensorStatusChanged);
        }

        let next = next_alarm_status(alarm, arming, was_active, active);
        tracing::debug!(
            sensor = %sensor.key(),
            was_active,
            active,
            %alarm,
            %arming,
            next = ?next,
            "sensor activation changed"
        );
        match next {
            Some(status) => self.set_alarm_status(status),
            None => Ok(()),
        }
    }

    /// Run cat detection on `image` and move the alarm status accordingly.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Analysis`] if the analyzer fails, or a
    /// storage error.
    pub fn process_image(&mut self, image: &Image) -> Result<(), CatpointError> {
        let cat = self
            .analyzer
            .image_contains_cat(image, self.confidence_threshold)?;
        self.cat_detected = cat;
        tracing::debug!(cat, bytes = image.len(), "image processed");

        if cat {
            if self.repo.get_arming_status()? == ArmingStatus::ArmedHome {
                self.set_alarm_status(AlarmStatus::Alarm)?;
            }
        } else if !self.any_sensor_active()? {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        self.publish(StatusEventKind::CatDetected(cat));
        Ok(())
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), CatpointError> {
        tracing::info!(alarm_status = %status, "setting alarm status");
        self.repo.set_alarm_status(status)?;
        self.publish(StatusEventKind::AlarmStatusChanged(status));
        Ok(())
    }

    fn deactivate_all_sensors(&mut self) -> Result<(), CatpointError> {
        let mut changed = false;
        for mut sensor in self.repo.get_sensors()? {
            if sensor.active {
                sensor.active = false;
                self.repo.update_sensor(&sensor)?;
                changed = true;
            }
        }
        if changed {
            self.publish(StatusEventKind::SensorStatusChanged);
        }
        Ok(())
    }

    fn any_sensor_active(&self) -> Result<bool, CatpointError> {
        Ok(self.repo.get_sensors()?.iter().any(|sensor| sensor.active))
    }

    fn publish(&self, kind: StatusEventKind) {
        let event = StatusEvent::new(kind);
        for listener in &self.listeners {
            if let Err(err) = listener.notify(&event) {
                tracing::warn!(error = %err, kind = ?event.kind, "status listener failed");
            }
        }
    }
}

/// Alarm status to write after a sensor moves from `was_active` to `active`,
/// or `None` when the alarm status must stay untouched.
fn next_alarm_status(
    alarm: AlarmStatus,
    arming: ArmingStatus,
    was_active: bool,
    active: bool,
) -> Option<AlarmStatus> {
    match (alarm, active) {
        (AlarmStatus::Alarm, _) => None,
        (_, true) if !arming.is_armed() => None,
        (AlarmStatus::NoAlarm, true) if !was_active => Some(AlarmStatus::PendingAlarm),
        (AlarmStatus::PendingAlarm, true) => Some(AlarmStatus::Alarm),
        (AlarmStatus::PendingAlarm, false) => Some(AlarmStatus::NoAlarm),
        _ => None,
    }
}
