use std::fmt;

/// Every `type` value that travels over the signaling socket, in either direction.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MessageKind {
    Connected,
    CreateRoom,
    RoomCreated,
    JoinRoom,
    RoomJoined,
    LeaveRoom,
    RoomLeft,
    ViewerJoined,
    ViewerDisconnected,
    HostDisconnected,
    Signal,
    Offer,
    Answer,
    IceCandidate,
    Error,
    Unknown,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Connected => "connected",
            MessageKind::CreateRoom => "create-room",
            MessageKind::RoomCreated => "room-created",
            MessageKind::JoinRoom => "join-room",
            MessageKind::RoomJoined => "room-joined",
            MessageKind::LeaveRoom => "leave-room",
            MessageKind::RoomLeft => "room-left",
            MessageKind::ViewerJoined => "viewer-joined",
            MessageKind::ViewerDisconnected => "viewer-disconnected",
            MessageKind::HostDisconnected => "host-disconnected",
            MessageKind::Signal => "signal",
            MessageKind::Offer => "offer",
            MessageKind::Answer => "answer",
            MessageKind::IceCandidate => "ice-candidate",
            MessageKind::Error => "error",
            MessageKind::Unknown => "unknown",
        }
    }

    /// Kinds the relay forwards to another client without looking inside.
    pub fn is_relay(&self) -> bool {
        matches!(
            self,
            MessageKind::Signal | MessageKind::Offer | MessageKind::Answer | MessageKind::IceCandidate
        )
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
