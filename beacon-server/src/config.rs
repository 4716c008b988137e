//! Server configuration

use beacon_core::IceServerConfig;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;

/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for both the WebSocket endpoint and the static files
    pub port: u16,

    /// Directory the static responder serves from
    pub static_root: PathBuf,

    /// Traversal endpoints handed to every client on connect
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_root: PathBuf::from("."),
            ice_servers: IceServerConfig::public_stun(),
        }
    }
}

impl ServerConfig {
    /// Defaults, with the port taken from `PORT` when it is set and valid.
    pub fn from_env() -> Self {
        let config = Self::default();

        match std::env::var(PORT_ENV) {
            Ok(raw) => match parse_port(&raw) {
                Some(port) => config.port(port),
                None => {
                    warn!("Ignoring invalid {}={:?}, using {}", PORT_ENV, raw, DEFAULT_PORT);
                    config
                }
            },
            Err(_) => config,
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn static_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.static_root = root.into();
        self
    }

    pub fn ice_servers(mut self, servers: Vec<IceServerConfig>) -> Self {
        self.ice_servers = servers;
        self
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_port(raw: &str) -> Option<u16> {
    raw.trim().parse().ok()
}
