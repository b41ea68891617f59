//! Domain-event publication.

use levelgate_core::AwardOutcome;
use tokio::sync::broadcast;

/// Default buffer size for the event channel.
const DEFAULT_CAPACITY: usize = 32;

/// Process-wide broadcast of award outcomes.
///
/// Every tracked activity publishes its [`AwardOutcome`] here so other
/// parts of the application (navigation, badges) can react without
/// polling. Publishing with no subscribers is a no-op; lagging
/// subscribers drop the oldest events, which is acceptable for
/// transient UI updates.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AwardOutcome>,
}

impl EventBus {
    /// Create a bus with the given channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future award outcomes.
    pub fn subscribe(&self) -> broadcast::Receiver<AwardOutcome> {
        self.tx.subscribe()
    }

    /// Publish an outcome to all current subscribers.
    pub fn publish(&self, outcome: AwardOutcome) {
        // A send error only means nobody is listening.
        let _ = self.tx.send(outcome);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
