use crate::error::RelayError;
use crate::registry::{CodeSource, IdGenerator, Outbox, Registry};
use crate::room::{Departure, RoomTable};
use beacon_core::{ClientId, ClientMessage, IceServerConfig, RoomId, ServerMessage};
use tracing::{debug, info};

/// The signaling state machine.
///
/// Owns both tables, so every transition below runs against a consistent view
/// of clients and rooms. Outbound frames go straight to the recipients' outboxes.
pub struct Router {
    ids: Box<dyn CodeSource>,
    registry: Registry,
    rooms: RoomTable,
    ice_servers: Vec<IceServerConfig>,
}

impl Router {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self::with_codes(Box::new(IdGenerator::new()), ice_servers)
    }

    pub fn with_codes(ids: Box<dyn CodeSource>, ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            ids,
            registry: Registry::new(),
            rooms: RoomTable::new(),
            ice_servers,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn rooms(&self) -> &RoomTable {
        &self.rooms
    }

    /// Registers a new connection and acknowledges it before anything else is sent.
    pub fn connect(&mut self, outbox: Outbox) -> Result<ClientId, RelayError> {
        let client_id = self.registry.register(self.ids.as_mut(), outbox)?;

        self.registry.send(
            &client_id,
            ServerMessage::Connected {
                client_id: client_id.clone(),
                ice_servers: self.ice_servers.clone(),
            },
        );

        info!("Client {} connected", client_id);
        Ok(client_id)
    }

    pub fn dispatch(&mut self, from: &ClientId, msg: ClientMessage) {
        if !self.registry.exists(from) {
            debug!("Ignoring {} from unregistered client {}", msg.kind(), from);
            return;
        }

        match msg {
            ClientMessage::CreateRoom { room_id } => self.create_room(from, room_id),
            ClientMessage::JoinRoom { room_id } => self.join_room(from, room_id),
            ClientMessage::LeaveRoom => self.leave_room(from),
            msg if msg.kind().is_relay() => self.relay(from, msg),
            msg => debug!("Ignoring {} message from {}", msg.kind(), from),
        }
    }

    /// Tears the client down and runs the cascade for the room it was in.
    pub fn disconnect(&mut self, client_id: &ClientId) {
        let Some(room_id) = self.registry.unregister(client_id) else {
            info!("Client {} disconnected", client_id);
            return;
        };

        info!("Client {} disconnected from room {}", client_id, room_id);
        self.depart(client_id, &room_id);
    }

    fn create_room(&mut self, host: &ClientId, requested: Option<RoomId>) {
        self.leave_current_room(host);

        match self
            .rooms
            .create_room(&mut self.registry, self.ids.as_mut(), host, requested)
        {
            Ok(room_id) => self
                .registry
                .send(host, ServerMessage::RoomCreated { room_id }),
            Err(e) => self.reject(host, e),
        }
    }

    fn join_room(&mut self, viewer: &ClientId, room_id: RoomId) {
        if self.registry.room_of(viewer) == Some(&room_id) {
            if let Some(room) = self.rooms.get(&room_id) {
                let host_id = room.host().clone();
                self.registry
                    .send(viewer, ServerMessage::RoomJoined { room_id, host_id });
                return;
            }
        }

        if !self.rooms.contains(&room_id) {
            self.reject(viewer, RelayError::RoomNotFound(room_id));
            return;
        }

        self.leave_current_room(viewer);

        match self.rooms.join_room(&mut self.registry, &room_id, viewer) {
            Ok(host_id) => {
                info!("Client {} joined room {} as viewer", viewer, room_id);
                self.registry.send(
                    &host_id,
                    ServerMessage::ViewerJoined {
                        viewer_id: viewer.clone(),
                    },
                );
                self.registry
                    .send(viewer, ServerMessage::RoomJoined { room_id, host_id });
            }
            Err(e) => self.reject(viewer, e),
        }
    }

    fn leave_room(&mut self, client_id: &ClientId) {
        match self.leave_current_room(client_id) {
            Some(room_id) => self
                .registry
                .send(client_id, ServerMessage::RoomLeft { room_id }),
            None => self.reject(client_id, RelayError::NotInRoom),
        }
    }

    fn relay(&mut self, from: &ClientId, msg: ClientMessage) {
        let Some((target, forwarded)) = ServerMessage::forward(from.clone(), msg) else {
            return;
        };

        if !self.registry.exists(&target) {
            debug!("Dropping {} from {}: {} is not connected", forwarded.kind(), from, target);
            return;
        }

        self.registry.send(&target, forwarded);
    }

    fn leave_current_room(&mut self, client_id: &ClientId) -> Option<RoomId> {
        let room_id = self.registry.room_of(client_id)?.clone();
        self.depart(client_id, &room_id);
        Some(room_id)
    }

    /// Removes the client from the room and notifies whoever is left behind.
    fn depart(&mut self, client_id: &ClientId, room_id: &RoomId) {
        match self
            .rooms
            .remove_client(&mut self.registry, client_id, room_id)
        {
            Departure::HostLeft { viewers } => {
                for viewer in &viewers {
                    self.registry.send(viewer, ServerMessage::HostDisconnected);
                }
            }
            Departure::ViewerLeft { host } => {
                self.registry.send(
                    &host,
                    ServerMessage::ViewerDisconnected {
                        viewer_id: client_id.clone(),
                    },
                );
            }
            Departure::NotMember => {
                debug!("Client {} was not a member of room {}", client_id, room_id);
            }
        }
    }

    fn reject(&self, client_id: &ClientId, err: RelayError) {
        debug!("Rejecting request from {}: {:?}", client_id, err);
        self.registry
            .send(client_id, ServerMessage::error(err.to_string()));
    }
}
