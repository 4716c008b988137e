use crate::error::RelayError;
use crate::registry::Outbox;
use crate::signaling::{RelayCommand, RelayStats, RoomSnapshot};
use beacon_core::{ClientId, ClientMessage, RoomId};
use tokio::sync::{mpsc, oneshot};

/// Cheap-to-clone access to the relay task.
#[derive(Clone)]
pub struct RelayHandle {
    sender: mpsc::Sender<RelayCommand>,
}

impl RelayHandle {
    pub fn new(sender: mpsc::Sender<RelayCommand>) -> Self {
        Self { sender }
    }

    /// Registers a connection. The `connected` frame is already queued on
    /// `outbox` when this returns.
    pub async fn connect(&self, outbox: Outbox) -> Result<ClientId, RelayError> {
        let (tx, rx) = oneshot::channel();
        self.command(RelayCommand::Connect {
            outbox,
            respond_to: tx,
        })
        .await?;

        rx.await.map_err(|_| RelayError::RelayClosed)?
    }

    pub async fn dispatch(&self, from: ClientId, msg: ClientMessage) -> Result<(), RelayError> {
        self.command(RelayCommand::Message { from, msg }).await
    }

    pub async fn disconnect(&self, client_id: ClientId) -> Result<(), RelayError> {
        self.command(RelayCommand::Disconnect { client_id }).await
    }

    pub async fn room(&self, room_id: RoomId) -> Result<Option<RoomSnapshot>, RelayError> {
        let (tx, rx) = oneshot::channel();
        self.command(RelayCommand::Room {
            room_id,
            respond_to: tx,
        })
        .await?;

        rx.await.map_err(|_| RelayError::RelayClosed)
    }

    pub async fn stats(&self) -> Result<RelayStats, RelayError> {
        let (tx, rx) = oneshot::channel();
        self.command(RelayCommand::Stats { respond_to: tx }).await?;

        rx.await.map_err(|_| RelayError::RelayClosed)
    }

    async fn command(&self, cmd: RelayCommand) -> Result<(), RelayError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| RelayError::RelayClosed)
    }
}
