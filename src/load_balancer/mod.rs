//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Authenticated request
//!     → pool.rs (immutable backend set + strategy)
//!     → Apply load balancing algorithm:
//!         - random.rs (uniform random index, the default)
//!         - round_robin.rs (rotate through backends)
//!     → backend.rs (the chosen host:port)
//! ```
//!
//! # Design Decisions
//! - The backend set is non-empty by construction; emptiness fails at startup
//! - No health awareness, weighting or affinity: every pick is independent
//! - Strategies are trait objects so new policies slot in without touching
//!   the connection handler

use std::fmt::Debug;
use std::num::NonZeroUsize;

pub mod backend;
pub mod pool;
pub mod random;
pub mod round_robin;

pub use backend::{Backend, BackendSet, EmptyBackendSet};
pub use pool::BackendPool;

/// A backend selection strategy.
///
/// Implementations must be safe to call from many tasks at once.
pub trait LoadBalancer: Send + Sync + Debug {
    /// Return an index in `0..count`.
    fn next_index(&self, count: NonZeroUsize) -> usize;
}
