use beacon_core::ServerMessage;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_host_disconnect_notifies_viewers() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");

    let mut host = TestClient::connect(&server).await.expect("host");
    let mut viewer1 = TestClient::connect(&server).await.expect("viewer 1");
    let mut viewer2 = TestClient::connect(&server).await.expect("viewer 2");

    let room_id = host.create_room(None).await.expect("create-room failed");
    viewer1.join_room(&room_id).await.expect("viewer 1 join");
    viewer2.join_room(&room_id).await.expect("viewer 2 join");
    host.recv().await.expect("first viewer-joined");
    host.recv().await.expect("second viewer-joined");

    host.close().await.expect("Failed to close host");

    for viewer in [&mut viewer1, &mut viewer2] {
        let msg = viewer.recv().await.expect("No host-disconnected");
        assert_eq!(msg, ServerMessage::HostDisconnected);
        viewer.expect_silence().await.expect("Exactly one notification");
    }

    let room = server.relay.room(room_id).await.expect("Relay stopped");
    assert!(room.is_none(), "room should be gone after host left");
}
