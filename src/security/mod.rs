//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed header map
//!     → auth.rs (single shared API key, exact match)
//!     → Ok: continue to backend selection
//!     → Unauthorized: 403, backend never contacted
//! ```
//!
//! # Design Decisions
//! - One static secret for every client; no rotation, no per-client keys

pub mod auth;

pub use auth::Authenticator;
