//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Build proxy state → Bind listener → Accept loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then state, then listener
//! - Connection tasks are never cancelled; exiting the process ends them

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
