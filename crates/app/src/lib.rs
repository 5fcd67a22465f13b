//! # catpoint-app
//!
//! Application layer — the alarm state machine and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StatusRepository` — alarm status, arming status and the sensor set
//!   - `ImageAnalyzer` — cat detection on camera frames
//!   - `StatusListener` — observers notified of status events
//! - Define the **driving/inbound port** as a use-case struct:
//!   - `SecurityService` — sensor activation, image processing, arming
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `catpoint-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
