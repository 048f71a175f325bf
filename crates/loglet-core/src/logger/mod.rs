//! # Logger
//!
//! Prefixed, leveled, colorized console logging.
//!
//! A [`LoggerRegistry`] owns the shared configuration, the output sink and a
//! cache of [`Logging`] handles keyed by prefix. Asking the registry for the
//! same prefix twice returns the same handle. The [`Logger`] facade exposes a
//! process-wide registry for code that does not want to carry one around.
//!
//! ## Line layout
//!
//! Each call writes exactly one line, built from the inside out:
//!
//! 1. the interpolated message (see [`crate::format`])
//! 2. the level color (yellow for warn, red for error, gray for debug)
//! 3. `[prefix] ` in cyan, when the handle has a non-empty prefix
//! 4. `[timestamp] ` in white, when timestamps are enabled
//!
//! Warnings and errors go to stderr, info and debug to stdout.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use loglet_core::logger::LoggerRegistry;
//! use loglet_core::params;
//! use loglet_core::sink::MemorySink;
//!
//! let sink = Arc::new(MemorySink::new());
//! let registry = LoggerRegistry::with_sink(sink.clone());
//! registry.set_timestamp_enabled(false);
//!
//! let log = registry.with_prefix("svc");
//! log.info("hello %s", &params!["world"]);
//!
//! assert_eq!(sink.stdout(), vec!["[svc] hello world".to_string()]);
//! assert!(Arc::ptr_eq(&log, &registry.with_prefix("svc")));
//! ```

mod handle;
mod registry;

pub use handle::Logging;
pub use registry::{Logger, LoggerRegistry};
