use crate::config::ServerConfig;
use crate::http::{StaticFiles, app};
use crate::signaling::{RelayHandle, Router, spawn_relay};
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Binds the configured port and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    serve_on(listener, config).await
}

pub async fn serve_on(listener: TcpListener, config: ServerConfig) -> Result<()> {
    let (relay, router) = build(&config);
    let addr = listener.local_addr().context("Listener has no local address")?;

    info!("Server running on http://{}", addr);
    info!("WebSocket server running on ws://{}", addr);
    info!("Serving static files from {}", config.static_root.display());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    drop(relay);
    info!("Server stopped");
    Ok(())
}

/// Starts the relay task and wires it into the HTTP routes.
pub fn build(config: &ServerConfig) -> (RelayHandle, axum::Router) {
    let relay = spawn_relay(Router::new(config.ice_servers.clone()));
    let http = app(relay.clone(), StaticFiles::new(config.static_root.clone()));
    (relay, http)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
