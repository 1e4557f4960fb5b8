//! Upstream forwarding.
//!
//! # Responsibilities
//! - Open a fresh connection to the selected backend per request
//! - Write the client's raw bytes verbatim
//! - Read the backend's reply with the same framer used for the client
//! - Close the upstream stream on every path

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::error::ProxyError;
use crate::load_balancer::Backend;
use crate::net::Framer;
use crate::resilience::timeouts;

/// Sends one request to one backend and collects the raw reply.
#[derive(Debug, Clone, Copy)]
pub struct Forwarder {
    framer: Framer,
    connect_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl Forwarder {
    pub fn new(framer: Framer, connect_timeout: Option<Duration>, write_timeout: Option<Duration>) -> Self {
        Self {
            framer,
            connect_timeout,
            write_timeout,
        }
    }

    /// Forward `request` to `backend` and return its raw response.
    pub async fn forward(&self, backend: &Backend, request: &[u8]) -> Result<Vec<u8>, ProxyError> {
        let mut upstream = timeouts::within(
            self.connect_timeout,
            "connect",
            TcpStream::connect(backend.address()),
        )
        .await
        .map_err(|source| ProxyError::Connect {
            backend: backend.to_string(),
            source,
        })?;

        tracing::debug!(backend = %backend, bytes = request.len(), "Forwarding request");

        let result = self.exchange(&mut upstream, backend, request).await;

        if let Err(e) = upstream.shutdown().await {
            tracing::trace!(backend = %backend, error = %e, "Upstream shutdown failed");
        }

        result
    }

    async fn exchange(
        &self,
        upstream: &mut TcpStream,
        backend: &Backend,
        request: &[u8],
    ) -> Result<Vec<u8>, ProxyError> {
        timeouts::within(self.write_timeout, "write", upstream.write_all(request))
            .await
            .map_err(|source| ProxyError::Write {
                backend: backend.to_string(),
                source,
            })?;

        let response = self.framer.read_message(upstream).await?;
        tracing::debug!(backend = %backend, bytes = response.len(), "Backend responded");
        Ok(response)
    }
}
