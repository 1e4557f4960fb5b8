//! TCP listener with an explicit concurrency policy.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Optionally enforce a max_connections cap via semaphore
//! - Surface accept errors to the caller without stopping the loop

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(#[source] std::io::Error),
    /// Failed to accept connection.
    #[error("Failed to accept: {0}")]
    Accept(#[source] std::io::Error),
}

/// How many connections may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// Every accepted connection gets its own task immediately.
    Unbounded,
    /// At most `n` connections are handled; accept waits for a free slot.
    Bounded(usize),
}

impl ConcurrencyPolicy {
    pub fn from_config(config: &ListenerConfig) -> Self {
        match config.max_connections {
            Some(n) => ConcurrencyPolicy::Bounded(n),
            None => ConcurrencyPolicy::Unbounded,
        }
    }
}

/// A TCP listener that applies a [`ConcurrencyPolicy`].
pub struct Listener {
    /// The underlying TCP listener.
    inner: TcpListener,
    /// Semaphore to limit concurrent connections, when bounded.
    connection_limit: Option<Arc<Semaphore>>,
    policy: ConcurrencyPolicy,
}

impl Listener {
    /// Bind to the configured address.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let listener = TcpListener::bind(config.bind_address())
            .await
            .map_err(ListenerError::Bind)?;

        Ok(Self::from_tcp(listener, ConcurrencyPolicy::from_config(config)))
    }

    /// Wrap an already bound listener.
    pub fn from_tcp(inner: TcpListener, policy: ConcurrencyPolicy) -> Self {
        let connection_limit = match policy {
            ConcurrencyPolicy::Bounded(n) => Some(Arc::new(Semaphore::new(n))),
            ConcurrencyPolicy::Unbounded => None,
        };

        if let Ok(addr) = inner.local_addr() {
            tracing::info!(address = %addr, policy = ?policy, "Listener bound");
        }

        Self {
            inner,
            connection_limit,
            policy,
        }
    }

    /// Accept a new connection, respecting the concurrency policy.
    ///
    /// When bounded this waits until a slot is free. The returned permit must
    /// be held for the connection's lifetime.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError> {
        let permit = match &self.connection_limit {
            // The semaphore is never closed, so acquire cannot fail.
            Some(limit) => limit.clone().acquire_owned().await.ok(),
            None => None,
        };

        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::debug!(
            peer_addr = %addr,
            available_permits = ?self.available_permits(),
            "Connection accepted"
        );

        Ok((stream, addr, ConnectionPermit { _permit: permit }))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Free connection slots, or `None` when unbounded.
    pub fn available_permits(&self) -> Option<usize> {
        self.connection_limit.as_ref().map(|s| s.available_permits())
    }

    pub fn policy(&self) -> ConcurrencyPolicy {
        self.policy
    }
}

/// A permit representing a connection slot.
///
/// When dropped, the connection slot is released back to the pool.
/// Holds nothing under [`ConcurrencyPolicy::Unbounded`].
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: Option<OwnedSemaphorePermit>,
}
