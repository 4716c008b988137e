mod client;
mod ice;
mod kind;
mod message;
mod room;

pub use client::ClientId;
pub use ice::IceServerConfig;
pub use kind::MessageKind;
pub use message::{ClientMessage, Forwarded, Relay, ServerMessage};
pub use room::RoomId;
