use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_malformed_frame_keeps_connection() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = TestClient::connect(&server).await.expect("connect");

    client.send_raw("this is not json").await.expect("send");
    client.expect_silence().await.expect("No reply to garbage");

    client
        .send_raw(r#"{"roomId":"no type field"}"#)
        .await
        .expect("send");
    client.expect_silence().await.expect("No reply to untyped frame");

    client
        .send_raw(r#"{"type":"dance","moves":3}"#)
        .await
        .expect("send");
    client.expect_silence().await.expect("Unknown kinds are ignored");

    let room_id = client
        .create_room(None)
        .await
        .expect("Connection should still work");
    assert!(!room_id.is_empty());
}
