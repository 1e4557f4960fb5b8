//! Proxy server setup and accept loop.
//!
//! # Responsibilities
//! - Build the shared, read-only proxy state from configuration
//! - Accept connections and spawn one handler task per connection
//! - Log accept errors and keep accepting
//! - Stop accepting when shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::config::ProxyConfig;
use crate::load_balancer::{BackendPool, BackendSet, EmptyBackendSet};
use crate::net::{Framer, Listener, ListenerError};
use crate::proxy::forwarder::Forwarder;
use crate::proxy::handler::handle_connection;
use crate::resilience::timeouts;
use crate::security::Authenticator;

/// Pause after a failed accept. Persistent errors such as running out of
/// file descriptors would otherwise spin the loop.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Immutable state shared by every connection task.
#[derive(Debug)]
pub struct ProxyState {
    pub framer: Framer,
    pub auth: Authenticator,
    pub pool: BackendPool,
    pub forwarder: Forwarder,
    pub write_timeout: Option<Duration>,
}

impl ProxyState {
    /// Build state from a validated configuration.
    ///
    /// Fails if no backends are configured, so the problem surfaces at
    /// startup rather than per request.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, EmptyBackendSet> {
        let backends = BackendSet::from_config(&config.backends)?;
        let framer = Framer::new(
            config.framing.chunk_size,
            timeouts::from_millis(config.timeouts.read_ms),
        );
        let write_timeout = timeouts::from_millis(config.timeouts.write_ms);

        Ok(Self {
            framer,
            auth: Authenticator::from_config(&config.auth),
            pool: BackendPool::from_config(backends, &config.load_balancing),
            forwarder: Forwarder::new(
                framer,
                timeouts::from_millis(config.timeouts.connect_ms),
                write_timeout,
            ),
            write_timeout,
        })
    }
}

/// TCP reverse proxy server.
pub struct ProxyServer {
    state: Arc<ProxyState>,
}

impl ProxyServer {
    /// Create a new server with the given configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self, EmptyBackendSet> {
        let state = ProxyState::from_config(config)?;
        tracing::info!(
            backends = state.pool.backends().len().get(),
            strategy = ?config.load_balancing.strategy,
            chunk_size = state.framer.chunk_size(),
            "Proxy state initialized"
        );
        Ok(Self {
            state: Arc::new(state),
        })
    }

    /// Run the accept loop until `shutdown` fires.
    ///
    /// In-flight connections are not cancelled; they finish on their own.
    pub async fn run(self, listener: Listener, mut shutdown: broadcast::Receiver<()>) {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(address = %addr, policy = ?listener.policy(), "Proxy server starting");
        }

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, no longer accepting");
                    break;
                }
                res = listener.accept() => match res {
                    Ok((stream, peer_addr, permit)) => {
                        let state = Arc::clone(&self.state);
                        tokio::spawn(async move {
                            let _permit = permit;
                            handle_connection(stream, peer_addr, state).await;
                        });
                    }
                    Err(e) => back_off_after_accept_error(&e).await,
                },
            }
        }
    }
}

async fn back_off_after_accept_error(err: &ListenerError) {
    tracing::error!(error = %err, backoff = ?ACCEPT_ERROR_BACKOFF, "Accept failed");
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}
