//! Alarm and arming status — the two system-wide enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// System-wide alarm level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    /// Human-readable label shown to occupants.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAlarm => f.write_str("no_alarm"),
            Self::PendingAlarm => f.write_str("pending_alarm"),
            Self::Alarm => f.write_str("alarm"),
        }
    }
}

/// Whether and how the system is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    /// `true` for both armed variants.
    #[must_use]
    pub fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarmed => f.write_str("disarmed"),
            Self::ArmedHome => f.write_str("armed_home"),
            Self::ArmedAway => f.write_str("armed_away"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_no_alarm() {
        assert_eq!(AlarmStatus::default(), AlarmStatus::NoAlarm);
    }

    #[test]
    fn should_default_to_disarmed() {
        assert_eq!(ArmingStatus::default(), ArmingStatus::Disarmed);
    }

    #[test]
    fn should_report_armed_only_for_armed_variants() {
        assert!(!ArmingStatus::Disarmed.is_armed());
        assert!(ArmingStatus::ArmedHome.is_armed());
        assert!(ArmingStatus::ArmedAway.is_armed());
    }

    #[test]
    fn should_display_snake_case_variant_name() {
        assert_eq!(AlarmStatus::PendingAlarm.to_string(), "pending_alarm");
        assert_eq!(ArmingStatus::ArmedAway.to_string(), "armed_away");
    }

    #[test]
    fn should_match_display_in_serde_json() {
        let json = serde_json::to_string(&ArmingStatus::ArmedHome).unwrap();
        assert_eq!(json, "\"armed_home\"");
        let parsed: AlarmStatus = serde_json::from_str("\"pending_alarm\"").unwrap();
        assert_eq!(parsed, AlarmStatus::PendingAlarm);
    }

    #[test]
    fn should_describe_alarm_levels() {
        assert_eq!(AlarmStatus::Alarm.description(), "Awooga!");
        assert_eq!(ArmingStatus::ArmedHome.description(), "Armed - At Home");
    }
}
