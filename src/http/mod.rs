//! HTTP layer subsystem.
//!
//! # Data Flow
//! ```text
//! Framed client bytes
//!     → request.rs (request line + header map, bytes left untouched)
//!     → ... authentication, forwarding ...
//!     → response.rs (relay backend bytes, or synthesize 403 / 500)
//! ```
//!
//! # Design Decisions
//! - Only the header block is interpreted; bodies pass through as raw bytes
//! - No HTTP library: the proxy works at the TCP level and never re-serializes

pub mod request;
pub mod response;

pub use request::{ParseError, ParsedRequest};
pub use response::{Outcome, SyntheticResponse};
