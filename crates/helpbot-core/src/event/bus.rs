//! Broadcast event bus for widget notifications.
//!
//! Every subscriber sees every event published after it subscribed, in
//! publish order. A subscriber that falls more than the channel capacity
//! behind skips the oldest events and receives `RecvError::Lagged` once.

use helpbot_types::event::WidgetEvent;
use tokio::sync::broadcast;
use tracing::trace;

/// Default channel capacity for a single widget's events.
pub const DEFAULT_CAPACITY: usize = 256;

/// Multi-consumer bus carrying [`WidgetEvent`]s.
///
/// Clones share one channel, so several widgets can publish to a single
/// bus and an embedder can watch them all through one receiver.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<WidgetEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.sender.subscribe()
    }

    /// Deliver `event` to current subscribers and return how many got it.
    ///
    /// With nobody listening the event is dropped and `0` is returned.
    pub fn publish(&self, event: WidgetEvent) -> usize {
        let name = event.name();
        let delivered = self.sender.send(event).unwrap_or(0);
        trace!(event = name, delivered, "published widget event");
        delivered
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
