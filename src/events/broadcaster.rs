use tokio::sync::broadcast;

use crate::models::CallbackEvent;

const BROADCAST_CHANNEL_SIZE: usize = 1000;

/// Fans validated callbacks out to the embedding application.
#[derive(Clone)]
pub struct CallbackBroadcaster {
    sender: broadcast::Sender<CallbackEvent>,
}

impl CallbackBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CHANNEL_SIZE);
        Self { sender }
    }

    /// Subscribe to callback events
    pub fn subscribe(&self) -> broadcast::Receiver<CallbackEvent> {
        self.sender.subscribe()
    }

    /// Publish one event. Returns how many subscribers received it.
    pub fn publish(&self, event: CallbackEvent) -> usize {
        let kind = event.kind;

        match self.sender.send(event) {
            Ok(count) => {
                tracing::debug!("Published {:?} callback to {} subscribers", kind, count);
                count
            }
            Err(_) => {
                // No active receivers - this is fine
                tracing::debug!("Dropped {:?} callback, no subscribers", kind);
                0
            }
        }
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for CallbackBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
