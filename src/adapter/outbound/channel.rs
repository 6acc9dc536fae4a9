//! Broadcast-channel notifier.
//!
//! Publishes every event on a `tokio` broadcast channel so any number of
//! observers (a front-end bridge, an indexer, a test) can follow the record
//! stream without being registered with the market itself.

use tokio::sync::broadcast;

use crate::port::{Event, Notifier};

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 1_024;

/// Notifier that forwards events to broadcast subscribers.
///
/// Slow subscribers that fall more than `capacity` events behind observe a
/// `Lagged` error from their receiver; the sender never blocks.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: broadcast::Sender<Event>,
}

impl ChannelNotifier {
    /// Create a notifier and its first receiver.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<Event>) {
        let (tx, rx) = broadcast::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Subscribe another receiver. It only sees events sent after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY).0
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: Event) {
        // No receivers is fine.
        let _ = self.tx.send(event);
    }
}
