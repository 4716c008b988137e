use anyhow::{Context, Result};
use beacon_core::IceServerConfig;
use beacon_server::{RelayHandle, ServerConfig, build};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A relay bound to an ephemeral localhost port.
pub struct TestServer {
    pub addr: SocketAddr,
    /// Direct access to the relay task, for inspecting room state.
    pub relay: RelayHandle,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        let config = ServerConfig::default()
            .ice_servers(vec![IceServerConfig::stun("stun:stun.test:3478")]);
        Self::start_with(config).await
    }

    pub async fn start_with(config: ServerConfig) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let addr = listener.local_addr()?;

        let (relay, app) = build(&config);
        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("[TestServer] serve failed: {}", e);
            }
        });

        Ok(Self { addr, relay, task })
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
