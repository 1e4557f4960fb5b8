//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the reverse proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (address, port, concurrency policy).
    pub listener: ListenerConfig,

    /// Backend server definitions, in selection order.
    pub backends: Vec<BackendConfig>,

    /// Backend selection strategy.
    pub load_balancing: LoadBalancingConfig,

    /// Shared-secret header check.
    pub auth: AuthConfig,

    /// Message framing on both sides of the proxy.
    pub framing: FramingConfig,

    /// Optional I/O deadlines.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            backends: vec!["127.0.0.1:9222".into(), "127.0.0.1:9223".into()],
            load_balancing: LoadBalancingConfig::default(),
            auth: AuthConfig::default(),
            framing: FramingConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (default: all interfaces).
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum concurrent connections. `None` keeps the accept loop unbounded.
    pub max_connections: Option<usize>,
}

impl ListenerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5555,
            max_connections: None,
        }
    }
}

/// Backend server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Backend address (e.g., "127.0.0.1:9222").
    pub address: String,
}

impl From<&str> for BackendConfig {
    fn from(address: &str) -> Self {
        Self {
            address: address.to_string(),
        }
    }
}

/// Load balancing algorithm.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    Random,
    RoundRobin,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoadBalancingConfig {
    pub strategy: Strategy,
}

/// API key check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Header that must carry the key (exact, case-sensitive name).
    pub header: String,

    /// The shared secret.
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            header: "Api-Key".to_string(),
            // WARNING: This is a placeholder! Change this in production.
            api_key: "MYKEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Read chunk size; a shorter read ends a message.
    pub chunk_size: usize,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            chunk_size: crate::net::framer::DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Timeout configuration for socket operations.
/// Every field is optional; an absent deadline never fires.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Backend connection establishment timeout in milliseconds.
    pub connect_ms: Option<u64>,

    /// Deadline in milliseconds for reading one whole message (client and backend).
    pub read_ms: Option<u64>,

    /// Write timeout in milliseconds (client and backend).
    pub write_ms: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
