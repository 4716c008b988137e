use beacon_core::{RoomId, ServerMessage};

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_viewers_join_room() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut host = TestClient::connect(&server).await.expect("host");
    let room_id = host.create_room(Some("R1")).await.expect("create-room");
    assert_eq!(room_id, RoomId::from("R1"));

    let mut viewers = Vec::new();
    for _ in 0..3 {
        let mut viewer = TestClient::connect(&server).await.expect("viewer");
        let reply = viewer.join_room(&room_id).await.expect("join");
        assert_eq!(
            reply,
            ServerMessage::RoomJoined {
                room_id: room_id.clone(),
                host_id: host.client_id.clone(),
            }
        );
        assert_eq!(
            host.recv().await.expect("viewer-joined"),
            ServerMessage::ViewerJoined {
                viewer_id: viewer.client_id.clone()
            }
        );
        viewers.push(viewer);
    }
    host.expect_silence().await.expect("One notification per viewer");

    let room = server
        .relay
        .room(room_id)
        .await
        .expect("Relay stopped")
        .expect("Room exists");
    let expected: Vec<_> = viewers.iter().map(|v| v.client_id.clone()).collect();
    assert_eq!(room.host, host.client_id);
    assert_eq!(room.viewers, expected);
}

#[tokio::test]
async fn test_requested_room_id_collision_gets_fresh_id() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut first = TestClient::connect(&server).await.expect("first");
    let mut second = TestClient::connect(&server).await.expect("second");

    let taken = first.create_room(Some("lobby")).await.expect("create-room");
    let other = second.create_room(Some("lobby")).await.expect("create-room");

    assert_eq!(taken, RoomId::from("lobby"));
    assert_ne!(other, taken);

    let lobby = server
        .relay
        .room(taken)
        .await
        .expect("Relay stopped")
        .expect("lobby exists");
    assert_eq!(lobby.host, first.client_id, "existing room must not be overwritten");
}
