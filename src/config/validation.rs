//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject configurations that can only fail per request, such as an empty
//!   backend list, so they fail at startup instead
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no backends configured")]
    NoBackends,
    #[error("backend #{0} has an empty address")]
    EmptyBackendAddress(usize),
    #[error("framing.chunk_size must be greater than zero")]
    ZeroChunkSize,
    #[error("listener.max_connections must be greater than zero when set")]
    ZeroMaxConnections,
    #[error("auth.header must not be empty")]
    EmptyAuthHeader,
    #[error("auth.api_key must not be empty")]
    EmptyApiKey,
    #[error("timeouts.{0} must be greater than zero when set")]
    ZeroTimeout(&'static str),
}

/// Check `config`, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.backends.is_empty() {
        errors.push(ValidationError::NoBackends);
    }
    for (i, backend) in config.backends.iter().enumerate() {
        if backend.address.trim().is_empty() {
            errors.push(ValidationError::EmptyBackendAddress(i));
        }
    }

    if config.framing.chunk_size == 0 {
        errors.push(ValidationError::ZeroChunkSize);
    }
    if config.listener.max_connections == Some(0) {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    if config.auth.header.trim().is_empty() {
        errors.push(ValidationError::EmptyAuthHeader);
    }
    if config.auth.api_key.is_empty() {
        errors.push(ValidationError::EmptyApiKey);
    }

    let timeouts = [
        ("connect_ms", config.timeouts.connect_ms),
        ("read_ms", config.timeouts.read_ms),
        ("write_ms", config.timeouts.write_ms),
    ];
    for (name, value) in timeouts {
        if value == Some(0) {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
