use anyhow::Result;
use beacon_core::IceServerConfig;
use beacon_server::ServerConfig;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "WebRTC signaling relay with a static file server")]
struct Cli {
    /// Listening port. Overrides `PORT`.
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served over plain HTTP
    #[arg(long, env = "BEACON_STATIC_ROOT")]
    static_root: Option<PathBuf>,

    /// STUN url handed to clients. Repeatable; replaces the public defaults.
    #[arg(long, env = "BEACON_STUN", value_delimiter = ',')]
    stun: Vec<String>,

    /// TURN url handed to clients. Repeatable.
    #[arg(long, requires_all = ["turn_username", "turn_credential"])]
    turn_url: Vec<String>,

    #[arg(long)]
    turn_username: Option<String>,

    #[arg(long)]
    turn_credential: Option<String>,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::from_env();

        if let Some(port) = self.port {
            config = config.port(port);
        }
        if let Some(root) = self.static_root {
            config = config.static_root(root);
        }

        let mut ice_servers = if self.stun.is_empty() {
            config.ice_servers.clone()
        } else {
            self.stun.into_iter().map(IceServerConfig::stun).collect()
        };
        if let (false, Some(username), Some(credential)) = (
            self.turn_url.is_empty(),
            self.turn_username,
            self.turn_credential,
        ) {
            ice_servers.push(IceServerConfig::turn(self.turn_url, username, credential));
        }

        config.ice_servers(ice_servers)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();

    println!("{}", "Beacon signaling relay".green().bold());
    println!("   {} http://{}", "HTTP:".cyan(), config.bind_addr());
    println!("   {} ws://{}/ws", "WS:  ".cyan(), config.bind_addr());

    for server in &config.ice_servers {
        debug!("ICE server {}", server.urls.join(", "));
    }
    info!(
        "Handing out {} ICE servers, serving files from {}",
        config.ice_servers.len(),
        config.static_root.display()
    );

    beacon_server::serve(config).await
}
