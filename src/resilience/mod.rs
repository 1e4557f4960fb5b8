//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Connect / read / write on either side of the proxy:
//!     → timeouts.rs (optional deadline)
//!     → On elapse: io::ErrorKind::TimedOut, handled like any I/O failure
//! ```
//!
//! # Design Decisions
//! - Deadlines are explicit configuration, absent by default
//! - No retries: every failure is terminal for its connection

pub mod timeouts;
