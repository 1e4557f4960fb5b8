//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults / config file (TOML) / CLI overrides
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → passed by reference into the listener, pool and handler at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AuthConfig, BackendConfig, FramingConfig, ListenerConfig, LoadBalancingConfig,
    ObservabilityConfig, ProxyConfig, Strategy, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
