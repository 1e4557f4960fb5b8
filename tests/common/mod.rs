//! Shared utilities for integration and load testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tcp_reverse_proxy::config::{BackendConfig, ProxyConfig};
use tcp_reverse_proxy::net::{ConcurrencyPolicy, Listener};
use tcp_reverse_proxy::{ProxyServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const REQUEST: &[u8] = b"GET /foo HTTP/1.1\r\nApi-Key: MYKEY\r\n\r\n";

/// Start a mock backend that answers every connection with `response`.
/// Returns its address and a counter of accepted connections.
pub async fn start_mock_backend(response: &'static [u8]) -> (SocketAddr, Arc<AtomicUsize>) {
    start_programmable_backend(move |_request| async move { response.to_vec() }).await
}

/// Start a mock backend whose reply is computed from the received bytes.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Arc<AtomicUsize>)
where
    F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Vec<u8>> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let f = f.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                buf.truncate(n);
                let response = f(buf).await;
                let _ = socket.write_all(&response).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, hits)
}

/// Start a backend that accepts and then never writes.
#[allow(dead_code)]
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            });
        }
    });
    addr
}

/// An address with nothing listening on it.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    TcpListener::bind("127.0.0.1:0").await.unwrap().local_addr().unwrap()
}

/// Default config pointing at `backends`.
pub fn config_for(backends: &[SocketAddr]) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.backends = backends
        .iter()
        .map(|addr| BackendConfig { address: addr.to_string() })
        .collect();
    config
}

/// Start the proxy on an ephemeral port.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let server = ProxyServer::new(&config).unwrap();
    let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let listener = Listener::from_tcp(tcp, ConcurrencyPolicy::from_config(&config.listener));
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    tokio::spawn(server.run(listener, shutdown.subscribe()));

    (addr, shutdown)
}

/// Send raw bytes and read until the proxy closes the connection.
pub async fn send_raw(proxy: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut client = TcpStream::connect(proxy).await.unwrap();
    client.write_all(request).await.unwrap();
    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();
    response
}
