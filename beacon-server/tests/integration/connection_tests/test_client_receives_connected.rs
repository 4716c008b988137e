use beacon_core::IceServerConfig;

use crate::integration::init_tracing;
use crate::utils::{TestClient, TestServer};

#[tokio::test]
async fn test_client_receives_connected() {
    init_tracing();

    let server = TestServer::start().await.expect("Failed to start server");

    let first = TestClient::connect(&server)
        .await
        .expect("Failed to connect first client");
    let second = TestClient::connect(&server)
        .await
        .expect("Failed to connect second client");

    for client in [&first, &second] {
        let id = client.client_id.as_str();
        assert_eq!(id.len(), 6, "client id should be six digits: {id}");
        assert!(id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(
            client.ice_servers,
            vec![IceServerConfig::stun("stun:stun.test:3478")]
        );
    }
    assert_ne!(first.client_id, second.client_id);

    let stats = server.relay.stats().await.expect("Relay stopped");
    assert_eq!(stats.clients, 2);
    assert_eq!(stats.rooms, 0);
}
