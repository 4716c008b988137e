use crate::error::RelayError;
use crate::registry::Outbox;
use beacon_core::{ClientId, ClientMessage, RoomId};
use tokio::sync::oneshot;

/// Point-in-time copy of a room, for callers outside the relay task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub host: ClientId,
    pub viewers: Vec<ClientId>,
}

/// Commands the connection tasks send to the relay.
#[derive(Debug)]
pub enum RelayCommand {
    /// A socket was accepted; reply with the id assigned to it.
    Connect {
        outbox: Outbox,
        respond_to: oneshot::Sender<Result<ClientId, RelayError>>,
    },

    /// A decoded frame from an already connected client.
    Message { from: ClientId, msg: ClientMessage },

    /// The socket closed.
    Disconnect { client_id: ClientId },

    Room {
        room_id: RoomId,
        respond_to: oneshot::Sender<Option<RoomSnapshot>>,
    },

    Stats {
        respond_to: oneshot::Sender<RelayStats>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub clients: usize,
    pub rooms: usize,
}
