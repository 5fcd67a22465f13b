//! # catpoint-domain
//!
//! Pure domain model for the catpoint home security system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Sensors** (door, window and motion detectors with an active flag)
//! - Define the **alarm status** (`NoAlarm` → `PendingAlarm` → `Alarm`) and the
//!   **arming status** (`Disarmed`, `ArmedHome`, `ArmedAway`)
//! - Define the opaque camera **Image** handed to cat detection
//! - Define **Status events** (alarm changes, cat detection, sensor changes)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod image;
pub mod sensor;
pub mod status;
