use crate::error::RelayError;
use crate::registry::{CodeSource, draw_unused};
use beacon_core::{ClientId, RoomId, ServerMessage};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::debug;

/// Write half of a client connection. Sends never block.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

struct ClientEntry {
    outbox: Outbox,
    room: Option<RoomId>,
}

/// Live connections keyed by client id.
#[derive(Default)]
pub struct Registry {
    clients: HashMap<ClientId, ClientEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new client with no room and returns its freshly drawn id.
    pub fn register(
        &mut self,
        ids: &mut dyn CodeSource,
        outbox: Outbox,
    ) -> Result<ClientId, RelayError> {
        let client_id = draw_unused(ids, |code| {
            self.clients.contains_key(&ClientId::from(code))
        })
        .map(ClientId::from)
        .ok_or(RelayError::IdsExhausted)?;

        self.clients
            .insert(client_id.clone(), ClientEntry { outbox, room: None });
        Ok(client_id)
    }

    /// Drops the client and hands back the room it was in, if any.
    pub fn unregister(&mut self, client_id: &ClientId) -> Option<RoomId> {
        self.clients.remove(client_id).and_then(|entry| entry.room)
    }

    /// At-most-once delivery. Unknown or closed recipients are skipped silently.
    pub fn send(&self, client_id: &ClientId, msg: ServerMessage) {
        let Some(entry) = self.clients.get(client_id) else {
            debug!("Dropping {} for absent client {}", msg.kind(), client_id);
            return;
        };
        if entry.outbox.send(msg).is_err() {
            debug!("Outbox of client {} already closed", client_id);
        }
    }

    pub fn exists(&self, client_id: &ClientId) -> bool {
        self.clients.contains_key(client_id)
    }

    pub fn room_of(&self, client_id: &ClientId) -> Option<&RoomId> {
        self.clients.get(client_id).and_then(|entry| entry.room.as_ref())
    }

    /// No-op for clients that are no longer registered.
    pub fn set_room(&mut self, client_id: &ClientId, room: Option<RoomId>) {
        if let Some(entry) = self.clients.get_mut(client_id) {
            entry.room = room;
        }
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
