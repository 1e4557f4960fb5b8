//! Startup orchestration.
//!
//! # Responsibilities
//! - Build proxy state from a validated configuration
//! - Bind the listener last, so traffic only arrives when ready
//! - Run until a shutdown signal arrives
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal

use thiserror::Error;

use crate::config::ProxyConfig;
use crate::lifecycle::{signals, Shutdown};
use crate::load_balancer::EmptyBackendSet;
use crate::net::{Listener, ListenerError};
use crate::proxy::ProxyServer;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Backends(#[from] EmptyBackendSet),
    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// Start the proxy and serve until SIGINT/SIGTERM.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    let server = ProxyServer::new(&config)?;
    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    signals::wait_for_shutdown_signal().await;
    shutdown.trigger();

    if let Err(e) = server_task.await {
        tracing::error!(error = %e, "Accept loop task failed");
    }
    Ok(())
}
