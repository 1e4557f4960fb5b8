//! Per-connection request pipeline.
//!
//! # Responsibilities
//! - Drive one accepted connection through the state machine
//! - Turn any stage failure into exactly one synthesized response
//! - Close the inbound stream on every exit path
//!
//! # Design Decisions
//! - Strictly linear: no retries, no path back to an earlier state
//! - A failure while writing the response is only logged

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::Instrument;

use crate::error::ProxyError;
use crate::http::response::{write_outcome, Outcome};
use crate::http::ParsedRequest;
use crate::net::{ConnectionId, ConnectionState};
use crate::proxy::server::ProxyState;
use crate::resilience::timeouts;

/// Handle one inbound connection to completion. Consumes the stream.
pub async fn handle_connection<S>(stream: S, peer_addr: SocketAddr, state: Arc<ProxyState>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let id = ConnectionId::new();
    let span = tracing::info_span!("connection", connection_id = %id, peer_addr = %peer_addr);

    ConnectionHandler::new(&state)
        .run(stream)
        .instrument(span)
        .await
}

struct ConnectionHandler<'a> {
    state: &'a ProxyState,
    current: ConnectionState,
}

impl<'a> ConnectionHandler<'a> {
    fn new(state: &'a ProxyState) -> Self {
        Self {
            state,
            current: ConnectionState::Reading,
        }
    }

    fn advance(&mut self) {
        let next = self.current.next();
        tracing::trace!(from = %self.current, to = %next, "State transition");
        self.current = next;
    }

    async fn run<S>(mut self, mut stream: S)
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let outcome = match self.pipeline(&mut stream).await {
            Ok(response) => {
                self.advance();
                Outcome::Relay(response)
            }
            Err(err) => {
                if matches!(err, ProxyError::Unauthorized) {
                    tracing::info!(state = %self.current, "Request rejected: {}", err);
                } else {
                    tracing::warn!(
                        state = %self.current,
                        timed_out = err.is_timeout(),
                        error = %err,
                        "Request failed"
                    );
                }
                Outcome::Synthetic(err.response())
            }
        };

        let written = timeouts::within(
            self.state.write_timeout,
            "write",
            write_outcome(&mut stream, &outcome),
        )
        .await;
        if let Err(e) = written {
            tracing::warn!(state = %self.current, error = %e, "Failed to write response");
        }

        if let Err(e) = stream.shutdown().await {
            tracing::trace!(error = %e, "Inbound shutdown failed");
        }
        self.current = ConnectionState::Closed;
        tracing::debug!(state = %self.current, "Connection finished");
    }

    /// Reading through Forwarding. Returns the backend's raw reply.
    async fn pipeline<S>(&mut self, stream: &mut S) -> Result<Vec<u8>, ProxyError>
    where
        S: AsyncRead + Unpin,
    {
        let state = self.state;

        let raw = state.framer.read_message(stream).await?;
        self.advance();

        let request = ParsedRequest::parse(&raw)?;
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            protocol = %request.protocol,
            "Request parsed"
        );
        self.advance();

        state.auth.check(&request)?;
        self.advance();

        let backend = state.pool.select();
        self.advance();

        state.forwarder.forward(backend, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;
    use crate::http::SyntheticResponse;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn state_with_backends(addrs: Vec<String>) -> Arc<ProxyState> {
        let mut config = ProxyConfig::default();
        config.backends = addrs.iter().map(|a| a.as_str().into()).collect();
        Arc::new(ProxyState::from_config(&config).unwrap())
    }

    async fn exchange(state: Arc<ProxyState>, request: &[u8]) -> Vec<u8> {
        let (mut client, proxy_side) = tokio::io::duplex(4096);
        let task = tokio::spawn(handle_connection(proxy_side, peer(), state));

        client.write_all(request).await.unwrap();
        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        task.await.unwrap();
        response
    }

    async fn unused_addr() -> String {
        TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap().to_string()
    }

    #[tokio::test]
    async fn missing_key_gets_forbidden() {
        let state = state_with_backends(vec![unused_addr().await]);
        let response = exchange(state, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").await;
        assert_eq!(response, SyntheticResponse::Forbidden.to_bytes());
    }

    #[tokio::test]
    async fn malformed_request_line_gets_internal_error() {
        let state = state_with_backends(vec![unused_addr().await]);
        let response = exchange(state, b"HELLO\r\n\r\n").await;
        assert_eq!(response, SyntheticResponse::InternalServerError.to_bytes());
    }

    #[tokio::test]
    async fn unreachable_backend_gets_internal_error() {
        let state = state_with_backends(vec![unused_addr().await]);
        let response = exchange(state, b"GET / HTTP/1.1\r\nApi-Key: MYKEY\r\n\r\n").await;
        assert_eq!(response, SyntheticResponse::InternalServerError.to_bytes());
    }

    #[tokio::test]
    async fn client_closing_early_gets_internal_error() {
        let state = state_with_backends(vec![unused_addr().await]);
        let (mut client, proxy_side) = tokio::io::duplex(4096);
        client.shutdown().await.unwrap();

        let task = tokio::spawn(handle_connection(proxy_side, peer(), state));
        let mut response = Vec::new();
        client.read_to_end(&mut response).await.unwrap();
        task.await.unwrap();

        assert_eq!(response, SyntheticResponse::InternalServerError.to_bytes());
    }

    #[tokio::test]
    async fn client_gone_before_response_still_finishes() {
        let state = state_with_backends(vec![unused_addr().await]);
        let (mut client, proxy_side) = tokio::io::duplex(4096);
        client.write_all(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").await.unwrap();
        drop(client);

        let task = tokio::spawn(handle_connection(proxy_side, peer(), state));
        tokio::time::timeout(std::time::Duration::from_secs(2), task)
            .await
            .expect("handler should finish when the client is gone")
            .unwrap();
    }

    #[tokio::test]
    async fn relays_backend_reply() {
        let upstream = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = upstream.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = upstream.accept().await.unwrap();
            let mut buf = [0u8; 512];
            let _ = socket.read(&mut buf).await;
            socket.write_all(b"HTTP/1.1 200 OK\r\n\r\nOK").await.unwrap();
        });

        let state = state_with_backends(vec![addr.to_string()]);
        let response = exchange(state, b"GET /foo HTTP/1.1\r\nApi-Key: MYKEY\r\n\r\n").await;
        assert_eq!(response, b"HTTP/1.1 200 OK\r\n\r\nOK");
    }
}
