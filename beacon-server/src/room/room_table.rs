use crate::error::RelayError;
use crate::registry::{CodeSource, Registry, draw_unused};
use crate::room::Room;
use beacon_core::{ClientId, RoomId};
use std::collections::HashMap;
use tracing::info;

/// What a removal did to the room, so the caller knows whom to notify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// The host left; the room is gone and these viewers were in it.
    HostLeft { viewers: Vec<ClientId> },
    /// A viewer left; the room is still there.
    ViewerLeft { host: ClientId },
    /// The client was not part of that room (or the room no longer exists).
    NotMember,
}

#[derive(Default)]
pub struct RoomTable {
    rooms: HashMap<RoomId, Room>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a room hosted by `host` and records it on the host's registry entry.
    ///
    /// A requested id is honored only if it is non-empty and not already taken;
    /// otherwise a fresh unused code is drawn.
    pub fn create_room(
        &mut self,
        registry: &mut Registry,
        ids: &mut dyn CodeSource,
        host: &ClientId,
        requested: Option<RoomId>,
    ) -> Result<RoomId, RelayError> {
        let room_id = match requested {
            Some(id) if !id.is_empty() && !self.rooms.contains_key(&id) => id,
            _ => draw_unused(ids, |code| self.rooms.contains_key(&RoomId::from(code)))
                .map(RoomId::from)
                .ok_or(RelayError::IdsExhausted)?,
        };

        self.rooms.insert(room_id.clone(), Room::new(host.clone()));
        registry.set_room(host, Some(room_id.clone()));

        info!("Room {} created by {}", room_id, host);
        Ok(room_id)
    }

    /// Adds `client_id` as a viewer and returns the room's host.
    pub fn join_room(
        &mut self,
        registry: &mut Registry,
        room_id: &RoomId,
        client_id: &ClientId,
    ) -> Result<ClientId, RelayError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RelayError::RoomNotFound(room_id.clone()))?;

        room.add_viewer(client_id.clone());
        registry.set_room(client_id, Some(room_id.clone()));

        Ok(room.host().clone())
    }

    /// Takes `client_id` out of `room_id`. A departing host deletes the room.
    pub fn remove_client(
        &mut self,
        registry: &mut Registry,
        client_id: &ClientId,
        room_id: &RoomId,
    ) -> Departure {
        let Some(room) = self.rooms.get_mut(room_id) else {
            return Departure::NotMember;
        };

        if room.is_host(client_id) {
            let viewers = self
                .rooms
                .remove(room_id)
                .map(Room::into_viewers)
                .unwrap_or_default();

            registry.set_room(client_id, None);
            for viewer in &viewers {
                registry.set_room(viewer, None);
            }

            info!("Room {} closed, host {} left", room_id, client_id);
            return Departure::HostLeft { viewers };
        }

        if room.remove_viewer(client_id) {
            registry.set_room(client_id, None);
            return Departure::ViewerLeft {
                host: room.host().clone(),
            };
        }

        Departure::NotMember
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
