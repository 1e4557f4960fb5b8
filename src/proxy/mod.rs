//! Proxy pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! server.rs (accept loop, one task per connection)
//!     → handler.rs (state machine)
//!         → net::framer → http::request → security::auth
//!         → load_balancer::pool
//!         → forwarder.rs (fresh upstream connection, raw bytes both ways)
//!         → http::response (relay or synthesize)
//! ```
//!
//! # Design Decisions
//! - The only state shared between tasks is immutable and lives in an `Arc`
//! - Upstream connections are never reused

pub mod forwarder;
pub mod handler;
pub mod server;

pub use forwarder::Forwarder;
pub use handler::handle_connection;
pub use server::{ProxyServer, ProxyState};
