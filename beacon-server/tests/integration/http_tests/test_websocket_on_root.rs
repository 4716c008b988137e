use beacon_core::ServerMessage;
use futures::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::integration::init_tracing;
use crate::utils::TestServer;

#[tokio::test]
async fn test_websocket_on_ws_path() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let (mut stream, _) = connect_async(format!("ws://{}/ws", server.addr))
        .await
        .expect("Failed to open /ws");

    let frame = tokio::time::timeout(std::time::Duration::from_secs(2), stream.next())
        .await
        .expect("Timeout")
        .expect("Stream ended")
        .expect("WebSocket error");

    let Message::Text(text) = frame else {
        panic!("expected a text frame, got {frame:?}");
    };
    let msg = ServerMessage::decode(text.as_str()).expect("decode");
    assert!(matches!(msg, ServerMessage::Connected { .. }));
}
