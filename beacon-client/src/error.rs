use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not connected to the signaling server")]
    NotConnected,

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
