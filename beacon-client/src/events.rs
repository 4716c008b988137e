use beacon_core::{MessageKind, ServerMessage};
use std::collections::HashMap;
use tokio::sync::{Mutex, mpsc};

/// Fans server frames out to whoever subscribed to their kind.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<HashMap<MessageKind, Vec<mpsc::UnboundedSender<ServerMessage>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, kind: MessageKind) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .await
            .entry(kind)
            .or_default()
            .push(tx);
        rx
    }

    /// Returns how many subscribers got the frame. Dropped receivers are pruned.
    pub async fn publish(&self, msg: &ServerMessage) -> usize {
        let mut subscribers = self.subscribers.lock().await;
        let Some(senders) = subscribers.get_mut(&msg.kind()) else {
            return 0;
        };

        senders.retain(|tx| tx.send(msg.clone()).is_ok());
        senders.len()
    }
}
