//! # Logging Utilities
//!
//! Bridges `tracing` into Loglet handles.
//!
//! [`LogletLayer`] is a `tracing_subscriber` layer that turns each event into
//! one Loglet line: the event target becomes the handle prefix, the `message`
//! field becomes the message and every other field is appended as
//! `key=value`. Level mapping:
//!
//! | tracing           | Loglet  |
//! |-------------------|---------|
//! | `ERROR`           | `Error` |
//! | `WARN`            | `Warn`  |
//! | `INFO`            | `Info`  |
//! | `DEBUG` / `TRACE` | `Debug` |
//!
//! Debug lines still go through [`Logging::debug`], so they only appear while
//! debug output is enabled on the registry.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loglet_utils::init_logging;
//!
//! // Reads RUST_LOG (default: info) and the LOGLET_* variables
//! init_logging().expect("Failed to initialize logging");
//!
//! tracing::info!(port = 8080, "server started");
//! tracing::warn!("disk almost full");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: event filter (e.g. `RUST_LOG=debug`, `RUST_LOG=my_app=debug`)
//! - `LOGLET_DEBUG`, `LOGLET_TIMESTAMP`, `LOGLET_COLOR`, `LOGLET_TIMESTAMP_FORMAT`:
//!   see [`loglet_core::config`]

use std::fmt;
use std::sync::Arc;

use loglet_core::logger::{Logger, LoggerRegistry, Logging};
use loglet_core::LogLevel;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Events from these targets are never forwarded, to keep the registry's own
/// diagnostics from looping back into it.
const SELF_TARGET: &str = "loglet_core";

/// Registry a layer forwards to
#[derive(Debug, Clone)]
enum Target
{
    Global,
    Owned(Arc<LoggerRegistry>),
}

/// `tracing` layer writing events through Loglet handles
#[derive(Debug, Clone)]
pub struct LogletLayer
{
    target: Target,
    prefixed: bool,
}

impl Default for LogletLayer
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl LogletLayer
{
    /// Forward to the process-wide registry ([`Logger::global`])
    #[must_use]
    pub fn new() -> Self
    {
        Self {
            target: Target::Global,
            prefixed: true,
        }
    }

    /// Forward to `registry`
    #[must_use]
    pub fn with_registry(registry: Arc<LoggerRegistry>) -> Self
    {
        Self {
            target: Target::Owned(registry),
            prefixed: true,
        }
    }

    /// Write every event through the internal handle instead of one handle per target
    #[must_use]
    pub fn unprefixed(mut self) -> Self
    {
        self.prefixed = false;
        self
    }

    fn registry(&self) -> &LoggerRegistry
    {
        match &self.target {
            Target::Global => Logger::global(),
            Target::Owned(registry) => registry.as_ref(),
        }
    }

    fn handle_for(&self, target: &str) -> Arc<Logging>
    {
        let registry = self.registry();
        if self.prefixed {
            registry.with_prefix(target)
        } else {
            registry.internal()
        }
    }
}

impl<S: Subscriber> Layer<S> for LogletLayer
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>)
    {
        let metadata = event.metadata();
        if metadata.target().starts_with(SELF_TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let message = visitor.finish();

        let handle = self.handle_for(metadata.target());
        // The text is already formatted; no params means no interpolation.
        match level_from_tracing(*metadata.level()) {
            LogLevel::Debug => handle.debug(&message, &[]),
            level => handle.log(level, &message, &[]),
        }
    }
}

/// Collects the `message` field and renders the rest as `key=value`
#[derive(Default)]
struct EventVisitor
{
    message: Option<String>,
    fields: Vec<String>,
}

impl EventVisitor
{
    fn finish(self) -> String
    {
        let mut parts = Vec::with_capacity(self.fields.len() + 1);
        if let Some(message) = self.message {
            parts.push(message);
        }
        parts.extend(self.fields);
        parts.join(" ")
    }
}

impl Visit for EventVisitor
{
    fn record_str(&mut self, field: &Field, value: &str)
    {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug)
    {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }
}

/// Map a `tracing` level onto a Loglet level (`TRACE` folds into `Debug`)
pub fn level_from_tracing(level: Level) -> LogLevel
{
    if level == Level::ERROR {
        LogLevel::Error
    } else if level == Level::WARN {
        LogLevel::Warn
    } else if level == Level::INFO {
        LogLevel::Info
    } else {
        LogLevel::Debug
    }
}

/// Map a Loglet level onto the matching `tracing` level
pub fn level_to_tracing(level: LogLevel) -> Level
{
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
    }
}

/// Initialize logging with default settings
///
/// Installs a global subscriber forwarding to the process-wide registry.
/// `RUST_LOG` filters events (default: `info`).
///
/// ## Example
///
/// ```rust,no_run
/// use loglet_utils::init_logging;
///
/// init_logging().expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<(), LoggingError>
{
    init_logging_internal(LogletLayer::new(), Level::INFO)
}

/// Initialize logging with an explicit level
///
/// `LogLevel::Debug` also enables debug output on the process-wide registry.
///
/// ## Example
///
/// ```rust,no_run
/// use loglet_utils::{init_logging_with_level, LogLevel};
///
/// init_logging_with_level(LogLevel::Debug).expect("Failed to initialize logging");
/// ```
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_level(level: LogLevel) -> Result<(), LoggingError>
{
    if level == LogLevel::Debug {
        Logger::set_debug_enabled(true);
    }
    init_logging_internal(LogletLayer::new(), level_to_tracing(level))
}

/// Initialize logging that forwards to `registry` instead of the process-wide one
///
/// ## Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging_with_registry(registry: Arc<LoggerRegistry>, level: LogLevel) -> Result<(), LoggingError>
{
    if level == LogLevel::Debug {
        registry.set_debug_enabled(true);
    }
    init_logging_internal(LogletLayer::with_registry(registry), level_to_tracing(level))
}

/// Internal initialization function
fn init_logging_internal(layer: LogletLayer, default_level: Level) -> Result<(), LoggingError>
{
    // RUST_LOG can override the default level with more specific filters
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    Registry::default()
        .with(layer.with_filter(env_filter))
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// A global subscriber was already installed
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// Invalid Loglet configuration
    #[error("Invalid logging configuration: {0}")]
    Config(#[from] loglet_core::LogletError),
}
