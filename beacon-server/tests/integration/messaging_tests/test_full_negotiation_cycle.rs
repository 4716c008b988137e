use beacon_core::{ClientMessage, ServerMessage};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer, relay_to};

/// Offer from host, answer from viewer, candidates both ways.
#[tokio::test]
async fn test_full_negotiation_cycle() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut host = TestClient::connect(&server).await.expect("host");
    let mut viewer = TestClient::connect(&server).await.expect("viewer");

    let room_id = host.create_room(None).await.expect("create-room");
    let joined = viewer.join_room(&room_id).await.expect("join");
    let ServerMessage::RoomJoined { host_id, .. } = joined else {
        panic!("expected room-joined, got {joined:?}");
    };
    let ServerMessage::ViewerJoined { viewer_id } = host.recv().await.expect("viewer-joined") else {
        panic!("expected viewer-joined");
    };

    host.send(&ClientMessage::Offer(relay_to(
        &viewer_id,
        json!({"offer": {"type": "offer", "sdp": "host-sdp"}}),
    )))
    .await
    .expect("offer");
    let offer = viewer.recv().await.expect("offer relayed");
    assert!(matches!(&offer, ServerMessage::Offer(f) if f.from == host_id));

    viewer
        .send(&ClientMessage::Answer(relay_to(
            &host_id,
            json!({"answer": {"type": "answer", "sdp": "viewer-sdp"}}),
        )))
        .await
        .expect("answer");
    let ServerMessage::Answer(answer) = host.recv().await.expect("answer relayed") else {
        panic!("expected an answer frame");
    };
    assert_eq!(answer.from, viewer_id);
    assert_eq!(answer.payload["answer"]["sdp"], "viewer-sdp");

    for n in 0..3 {
        host.send(&ClientMessage::IceCandidate(relay_to(
            &viewer_id,
            json!({"candidate": {"candidate": format!("host-{n}")}}),
        )))
        .await
        .expect("host candidate");
        viewer
            .send(&ClientMessage::IceCandidate(relay_to(
                &host_id,
                json!({"candidate": {"candidate": format!("viewer-{n}")}}),
            )))
            .await
            .expect("viewer candidate");
    }

    for n in 0..3 {
        let ServerMessage::IceCandidate(at_viewer) = viewer.recv().await.expect("candidate") else {
            panic!("expected a candidate at the viewer");
        };
        assert_eq!(at_viewer.payload["candidate"]["candidate"], format!("host-{n}"));

        let ServerMessage::IceCandidate(at_host) = host.recv().await.expect("candidate") else {
            panic!("expected a candidate at the host");
        };
        assert_eq!(at_host.payload["candidate"]["candidate"], format!("viewer-{n}"));
    }
}
