use beacon_core::{ClientMessage, ServerMessage};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer, relay_to};

#[tokio::test]
async fn test_offer_is_relayed() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut host = TestClient::connect(&server).await.expect("host");
    let mut viewer = TestClient::connect(&server).await.expect("viewer");

    let room_id = host.create_room(Some("R1")).await.expect("create-room");
    viewer.join_room(&room_id).await.expect("join");
    host.recv().await.expect("viewer-joined");

    let offer = json!({"type": "offer", "sdp": "v=0\r\no=- 1 2 IN IP4 127.0.0.1\r\n"});
    host.send(&ClientMessage::Offer(relay_to(
        &viewer.client_id,
        json!({ "offer": offer.clone() }),
    )))
    .await
    .expect("send offer");

    let ServerMessage::Offer(forwarded) = viewer.recv().await.expect("No offer relayed") else {
        panic!("expected an offer frame");
    };
    assert_eq!(forwarded.from, host.client_id);
    assert_eq!(forwarded.payload["offer"], offer);

    host.expect_silence().await.expect("Sender gets no echo");
}

#[tokio::test]
async fn test_raw_frame_fields_survive_relay() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut a = TestClient::connect(&server).await.expect("a");
    let mut b = TestClient::connect(&server).await.expect("b");

    let frame = json!({
        "type": "signal",
        "to": b.client_id,
        "signal": {"kind": "renegotiate", "seq": 4},
        "from": "someone-else",
    });
    a.send_raw(&frame.to_string()).await.expect("send");

    let msg = b.recv().await.expect("No signal relayed");
    let value = serde_json::to_value(&msg).expect("encode");
    assert_eq!(
        value,
        json!({
            "type": "signal",
            "to": b.client_id,
            "from": a.client_id,
            "signal": {"kind": "renegotiate", "seq": 4},
        })
    );
}
