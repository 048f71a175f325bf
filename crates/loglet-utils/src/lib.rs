//! # Loglet Utilities
//!
//! `tracing` integration and shared helpers for Loglet.
//!
//! This crate wires the `tracing` ecosystem into Loglet handles, so code
//! instrumented with `tracing` macros prints through the same prefixed,
//! colorized lines as direct Loglet calls.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_with_level, init_logging_with_registry, LogletLayer, LoggingError};
pub use loglet_core::{params, LogLevel, Logger, LoggerRegistry, Logging, Param};
pub use tracing::{debug, error, info, warn};
