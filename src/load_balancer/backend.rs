//! Backend abstraction.
//!
//! # Responsibilities
//! - Represent a single upstream server by its `host:port` address
//! - Hold the non-empty, ordered set of configured backends

use std::fmt;
use std::num::NonZeroUsize;

use thiserror::Error;

use crate::config::BackendConfig;

/// A single backend server. Resolution happens at connect time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Backend {
    address: String,
}

impl Backend {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Returned when a backend set would be empty.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("at least one backend must be configured")]
pub struct EmptyBackendSet;

/// Ordered, non-empty list of backends.
#[derive(Debug, Clone)]
pub struct BackendSet {
    backends: Vec<Backend>,
}

impl BackendSet {
    /// Build a set, failing if `backends` is empty.
    pub fn new(backends: Vec<Backend>) -> Result<Self, EmptyBackendSet> {
        if backends.is_empty() {
            return Err(EmptyBackendSet);
        }
        Ok(Self { backends })
    }

    pub fn from_config(configs: &[BackendConfig]) -> Result<Self, EmptyBackendSet> {
        Self::new(configs.iter().map(|c| Backend::new(c.address.clone())).collect())
    }

    pub fn len(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.backends.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Backend at `index`, wrapping around the set length.
    pub fn get(&self, index: usize) -> &Backend {
        &self.backends[index % self.backends.len()]
    }
}
