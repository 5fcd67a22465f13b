//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CatpointError`] via `#[from]` or an explicit `From` impl, so port
//! boundaries only ever carry this one type.

use std::error::Error as StdError;

/// Boxed source error carried by adapter-originated variants.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Top-level error for the catpoint workspace.
#[derive(Debug, thiserror::Error)]
pub enum CatpointError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A lookup by identity found nothing.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The status repository failed.
    #[error("storage error")]
    Storage(#[source] BoxError),

    /// The image analyzer failed.
    #[error("image analysis error")]
    Analysis(#[source] BoxError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A sensor was given an empty name.
    #[error("name must not be empty")]
    EmptyName,

    /// A sensor with the same name and type already exists.
    #[error("sensor {0} already exists")]
    DuplicateSensor(String),
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of thing that was looked up (e.g. `"Sensor"`).
    pub entity: &'static str,
    /// Display form of the identity that was looked up.
    pub id: String,
}
