//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → per-connection spans (connection_id, peer_addr)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber to stdout, EnvFilter)
//! ```

pub mod logging;
