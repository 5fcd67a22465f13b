//! Listener port — observers of status events.

use catpoint_domain::error::CatpointError;
use catpoint_domain::event::StatusEvent;

/// Receives every [`StatusEvent`] the security service emits.
pub trait StatusListener: Send + Sync {
    /// Handle one event. Failures are logged by the caller and do not abort
    /// the operation that produced the event.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn notify(&self, event: &StatusEvent) -> Result<(), CatpointError>;
}
