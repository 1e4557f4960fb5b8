//! TCP-level reverse proxy library.
//!
//! Accepts raw connections, reads one HTTP/1.x request head, checks a shared
//! API key, and relays the untouched bytes to a randomly selected backend.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod load_balancer;
pub mod net;
pub mod observability;
pub mod proxy;
pub mod resilience;
pub mod security;

pub use config::schema::ProxyConfig;
pub use error::ProxyError;
pub use lifecycle::Shutdown;
pub use proxy::ProxyServer;
