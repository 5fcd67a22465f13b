//! In-process event bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use catpoint_domain::error::CatpointError;
use catpoint_domain::event::StatusEvent;

use crate::ports::StatusListener;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Register it with the security service as a [`StatusListener`]; every
/// subscriber then receives the service's events. Publishing succeeds even
/// when there are no active subscribers (the event is simply dropped).
pub struct InProcessEventBus {
    sender: broadcast::Sender<StatusEvent>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.sender.subscribe()
    }
}

impl StatusListener for InProcessEventBus {
    fn notify(&self, event: &StatusEvent) -> Result<(), CatpointError> {
        // send fails only when there are zero receivers
        let _ = self.sender.send(event.clone());
        Ok(())
    }
}
