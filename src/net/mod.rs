//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, concurrency policy)
//!     → connection.rs (connection id, state machine states)
//!     → framer.rs (read one message, short-read terminated)
//!     → Hand off to the proxy handler
//!
//! Connection States:
//!     Reading → Parsing → Authenticating → SelectingBackend
//!         → Forwarding → Responding → Closed
//! ```
//!
//! # Design Decisions
//! - Unbounded by default; a bounded policy is one config value away
//! - The same framer reads client requests and backend responses

pub mod connection;
pub mod framer;
pub mod listener;

pub use connection::{ConnectionId, ConnectionState};
pub use framer::{FrameError, Framer};
pub use listener::{ConcurrencyPolicy, Listener, ListenerError};
