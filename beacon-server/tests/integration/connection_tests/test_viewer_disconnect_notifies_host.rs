use beacon_core::ServerMessage;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_viewer_disconnect_notifies_host() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");

    let mut host = TestClient::connect(&server).await.expect("host");
    let mut viewer = TestClient::connect(&server).await.expect("viewer");
    let viewer_id = viewer.client_id.clone();

    let room_id = host.create_room(None).await.expect("create-room failed");
    viewer.join_room(&room_id).await.expect("join failed");
    host.recv().await.expect("viewer-joined");

    viewer.close().await.expect("Failed to close viewer");

    let msg = host.recv().await.expect("No viewer-disconnected");
    assert_eq!(msg, ServerMessage::ViewerDisconnected { viewer_id });
    host.expect_silence().await.expect("Exactly one notification");

    let room = server
        .relay
        .room(room_id)
        .await
        .expect("Relay stopped")
        .expect("Room should survive a viewer leaving");
    assert_eq!(room.host, host.client_id);
    assert!(room.viewers.is_empty());
}
