use beacon_core::RoomId;
use thiserror::Error;

/// Failures the relay reports back to a client or to its caller.
///
/// The `Display` text of a variant is what goes out in an `error` frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Room not found")]
    RoomNotFound(RoomId),

    #[error("Not in a room")]
    NotInRoom,

    #[error("No free id left")]
    IdsExhausted,

    #[error("Relay is not running")]
    RelayClosed,
}
