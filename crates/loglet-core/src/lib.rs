//! # loglet-core
//!
//! Leveled console logging and error normalization for Loglet.
//!
//! This crate provides:
//! - Prefixed logging handles with a shared, process-wide configuration
//!   (debug output, timestamps, color)
//! - printf-style message interpolation
//! - Helpers that turn arbitrary caught values (errors, panic payloads, plain
//!   values) into readable strings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loglet_core::prelude::*;
//! use loglet_core::params;
//!
//! let log = Logger::with_prefix("svc");
//! log.info("listening on port %d", &params![8080]);
//!
//! Logger::set_debug_enabled(true);
//! log.debug("config: %j", &params![serde_json::json!({"workers": 4})]);
//!
//! match Thrown::catch(|| panic!("worker crashed")) {
//!     Ok(()) => {}
//!     Err(thrown) => log.error("%s", &params![get_error_message(&thrown)]),
//! }
//! ```

pub mod config;
pub mod error;
pub mod error_info;
pub mod format;
pub mod level;
pub mod logger;
pub mod prelude;
pub mod sink;
pub mod style;

// Re-export commonly used types
pub use config::LoggerConfig;
pub use error::{LogletError, LogletResult};
pub use error_info::{get_error, get_error_message, get_error_name, get_error_stack, ErrorDetails, ErrorLike, Thrown};
pub use format::{interpolate, Param};
pub use level::LogLevel;
pub use logger::{Logger, LoggerRegistry, Logging};
pub use sink::{ConsoleSink, LogSink, MemorySink, Stream};
pub use style::ColorMode;
