//! Connection identity and state machine states.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Define the linear per-connection state machine
//!
//! # Design Decisions
//! - States only move forward; any failure jumps straight to `Closed`

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global atomic counter for connection IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Pipeline stage of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConnectionState {
    Reading,
    Parsing,
    Authenticating,
    SelectingBackend,
    Forwarding,
    Responding,
    Closed,
}

impl ConnectionState {
    /// The next state on success. `Closed` is terminal.
    pub fn next(self) -> Self {
        match self {
            ConnectionState::Reading => ConnectionState::Parsing,
            ConnectionState::Parsing => ConnectionState::Authenticating,
            ConnectionState::Authenticating => ConnectionState::SelectingBackend,
            ConnectionState::SelectingBackend => ConnectionState::Forwarding,
            ConnectionState::Forwarding => ConnectionState::Responding,
            ConnectionState::Responding | ConnectionState::Closed => ConnectionState::Closed,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ConnectionState::Closed
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Reading => "reading",
            ConnectionState::Parsing => "parsing",
            ConnectionState::Authenticating => "authenticating",
            ConnectionState::SelectingBackend => "selecting_backend",
            ConnectionState::Forwarding => "forwarding",
            ConnectionState::Responding => "responding",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}
