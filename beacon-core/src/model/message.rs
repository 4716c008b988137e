use crate::model::client::ClientId;
use crate::model::ice::IceServerConfig;
use crate::model::kind::MessageKind;
use crate::model::room::RoomId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Negotiation payload addressed to another client.
///
/// Everything except `to` is kept as-is; the relay never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relay {
    pub to: ClientId,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// A [`Relay`] as delivered to its target, attributed to the sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forwarded {
    pub from: ClientId,
    pub to: ClientId,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Forwarded {
    pub fn new(from: ClientId, relay: Relay) -> Self {
        let Relay { to, mut payload } = relay;
        // Sender attribution is ours to set, a client-supplied `from` is discarded.
        payload.remove("from");

        Self { from, to, payload }
    }
}

/// Browsers may send a room id as a string or as a bare number.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseRoomId {
    Text(String),
    Number(Number),
}

impl From<LooseRoomId> for RoomId {
    fn from(raw: LooseRoomId) -> Self {
        match raw {
            LooseRoomId::Text(text) => RoomId::from(text),
            LooseRoomId::Number(number) => RoomId::from(number.to_string()),
        }
    }
}

fn loose_room_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RoomId>, D::Error> {
    Ok(Option::<LooseRoomId>::deserialize(deserializer)?.map(RoomId::from))
}

/// Missing or null becomes the empty id, which never names a room.
fn loose_room_id_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RoomId, D::Error> {
    Ok(loose_room_id(deserializer)?.unwrap_or_default())
}

/// Frames a browser sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateRoom {
        #[serde(
            default,
            deserialize_with = "loose_room_id",
            skip_serializing_if = "Option::is_none"
        )]
        room_id: Option<RoomId>,
    },
    JoinRoom {
        #[serde(default, deserialize_with = "loose_room_id_or_empty")]
        room_id: RoomId,
    },
    LeaveRoom,
    Signal(Relay),
    Offer(Relay),
    Answer(Relay),
    IceCandidate(Relay),
    /// Any `type` the relay does not know. Ignored on purpose.
    #[serde(other)]
    Unknown,
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            ClientMessage::CreateRoom { .. } => MessageKind::CreateRoom,
            ClientMessage::JoinRoom { .. } => MessageKind::JoinRoom,
            ClientMessage::LeaveRoom => MessageKind::LeaveRoom,
            ClientMessage::Signal(_) => MessageKind::Signal,
            ClientMessage::Offer(_) => MessageKind::Offer,
            ClientMessage::Answer(_) => MessageKind::Answer,
            ClientMessage::IceCandidate(_) => MessageKind::IceCandidate,
            ClientMessage::Unknown => MessageKind::Unknown,
        }
    }
}

/// Frames the relay sends to a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Connected {
        client_id: ClientId,
        #[serde(default)]
        ice_servers: Vec<IceServerConfig>,
    },
    RoomCreated {
        room_id: RoomId,
    },
    RoomJoined {
        room_id: RoomId,
        host_id: ClientId,
    },
    RoomLeft {
        room_id: RoomId,
    },
    ViewerJoined {
        viewer_id: ClientId,
    },
    ViewerDisconnected {
        viewer_id: ClientId,
    },
    HostDisconnected,
    Signal(Forwarded),
    Offer(Forwarded),
    Answer(Forwarded),
    IceCandidate(Forwarded),
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            ServerMessage::Connected { .. } => MessageKind::Connected,
            ServerMessage::RoomCreated { .. } => MessageKind::RoomCreated,
            ServerMessage::RoomJoined { .. } => MessageKind::RoomJoined,
            ServerMessage::RoomLeft { .. } => MessageKind::RoomLeft,
            ServerMessage::ViewerJoined { .. } => MessageKind::ViewerJoined,
            ServerMessage::ViewerDisconnected { .. } => MessageKind::ViewerDisconnected,
            ServerMessage::HostDisconnected => MessageKind::HostDisconnected,
            ServerMessage::Signal(_) => MessageKind::Signal,
            ServerMessage::Offer(_) => MessageKind::Offer,
            ServerMessage::Answer(_) => MessageKind::Answer,
            ServerMessage::IceCandidate(_) => MessageKind::IceCandidate,
            ServerMessage::Error { .. } => MessageKind::Error,
        }
    }

    /// Re-tags an inbound relay frame for delivery to its target.
    ///
    /// Returns `None` for frames that are not relay kinds.
    pub fn forward(from: ClientId, msg: ClientMessage) -> Option<(ClientId, Self)> {
        let (relay, wrap): (Relay, fn(Forwarded) -> ServerMessage) = match msg {
            ClientMessage::Signal(relay) => (relay, ServerMessage::Signal),
            ClientMessage::Offer(relay) => (relay, ServerMessage::Offer),
            ClientMessage::Answer(relay) => (relay, ServerMessage::Answer),
            ClientMessage::IceCandidate(relay) => (relay, ServerMessage::IceCandidate),
            _ => return None,
        };
        let target = relay.to.clone();

        Some((target, wrap(Forwarded::new(from, relay))))
    }
}
