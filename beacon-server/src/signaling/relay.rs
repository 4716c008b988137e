use crate::signaling::{RelayCommand, RelayHandle, RelayStats, RoomSnapshot, Router};
use tokio::sync::mpsc;
use tracing::{info, warn};

const COMMAND_BUFFER: usize = 256;

/// Single owner of the relay state.
///
/// Commands are processed one at a time, so compound operations such as a join
/// racing the host's disconnect can never interleave.
pub struct Relay {
    router: Router,
    command_rx: mpsc::Receiver<RelayCommand>,
}

impl Relay {
    pub fn new(router: Router, command_rx: mpsc::Receiver<RelayCommand>) -> Self {
        Self { router, command_rx }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!(
            "Relay event loop finished (clients: {}, rooms: {})",
            self.router.registry().len(),
            self.router.rooms().len()
        );
    }

    fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Connect { outbox, respond_to } => {
                let result = self.router.connect(outbox);
                if let Err(e) = &result {
                    warn!("Refusing connection: {}", e);
                }
                if let Err(Ok(client_id)) = respond_to.send(result) {
                    // The socket task went away before it learned its id.
                    self.router.disconnect(&client_id);
                }
            }

            RelayCommand::Message { from, msg } => self.router.dispatch(&from, msg),

            RelayCommand::Disconnect { client_id } => self.router.disconnect(&client_id),

            RelayCommand::Room {
                room_id,
                respond_to,
            } => {
                let snapshot = self.router.rooms().get(&room_id).map(|room| RoomSnapshot {
                    room_id: room_id.clone(),
                    host: room.host().clone(),
                    viewers: room.viewers().to_vec(),
                });
                let _ = respond_to.send(snapshot);
            }

            RelayCommand::Stats { respond_to } => {
                let _ = respond_to.send(RelayStats {
                    clients: self.router.registry().len(),
                    rooms: self.router.rooms().len(),
                });
            }
        }
    }
}

/// Starts the relay task and returns a handle to it.
pub fn spawn_relay(router: Router) -> RelayHandle {
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    tokio::spawn(Relay::new(router, command_rx).run());
    RelayHandle::new(command_tx)
}
