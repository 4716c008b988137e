use beacon_core::{ClientId, ClientMessage};
use serde_json::json;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer, relay_to};

#[tokio::test]
async fn test_relay_to_absent_peer_is_dropped() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut sender = TestClient::connect(&server).await.expect("sender");
    let mut bystander = TestClient::connect(&server).await.expect("bystander");

    sender
        .send(&ClientMessage::IceCandidate(relay_to(
            &ClientId::from("000000"),
            json!({"candidate": {"candidate": "candidate:1 1 udp 1 10.0.0.1 9 typ host"}}),
        )))
        .await
        .expect("send");

    sender.expect_silence().await.expect("No error for absent peer");
    bystander.expect_silence().await.expect("Nobody else receives it");
}

#[tokio::test]
async fn test_relay_to_departed_peer_is_dropped() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");
    let mut sender = TestClient::connect(&server).await.expect("sender");
    let gone = TestClient::connect(&server).await.expect("gone");
    let gone_id = gone.client_id.clone();
    gone.close().await.expect("close");

    // Let the relay process the disconnect before relaying.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    sender
        .send(&ClientMessage::Answer(relay_to(&gone_id, json!({"answer": {}}))))
        .await
        .expect("send");
    sender.expect_silence().await.expect("No error for departed peer");

    let stats = server.relay.stats().await.expect("Relay stopped");
    assert_eq!(stats.clients, 1);
}
