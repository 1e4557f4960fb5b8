//! TCP Reverse Proxy
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────────┐
//!                      │                   TCP REVERSE PROXY                   │
//!                      │                                                       │
//!   Client request     │  ┌──────────┐   ┌─────────┐   ┌─────────┐            │
//!   ───────────────────┼─▶│ listener │──▶│ framer  │──▶│ request │            │
//!                      │  │ + policy │   │(short   │   │ parser  │            │
//!                      │  └──────────┘   │ read)   │   └────┬────┘            │
//!                      │                 └─────────┘        ▼                 │
//!                      │                               ┌─────────┐            │
//!                      │                               │ api key │──▶ 403     │
//!                      │                               └────┬────┘            │
//!                      │                                    ▼                 │
//!                      │  ┌──────────┐   ┌───────────┐ ┌─────────┐            │
//!   Client response    │  │ response │◀──│ forwarder │◀│ random  │            │
//!   ◀──────────────────┼──│ relay or │   │ (framer)  │ │ backend │            │
//!                      │  │ 500      │   └─────┬─────┘ └─────────┘            │
//!                      │  └──────────┘         │                              │
//!                      └───────────────────────┼──────────────────────────────┘
//!                                              ▼
//!                                           Backend
//! ```

use std::path::PathBuf;

use clap::Parser;

use tcp_reverse_proxy::config::{self, ProxyConfig};
use tcp_reverse_proxy::lifecycle::startup;
use tcp_reverse_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "tcp-reverse-proxy")]
#[command(about = "Reverse Proxy Test", long_about = None)]
struct Cli {
    /// Set proxy port
    #[arg(short, long)]
    port: Option<u16>,

    /// Load configuration from a TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        backends = config.backends.len(),
        max_connections = ?config.listener.max_connections,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
