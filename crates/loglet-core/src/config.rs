//! # Logger Configuration
//!
//! Flags shared by every handle of a [`LoggerRegistry`].
//!
//! The debug and timestamp switches are atomics read at call time, so flipping
//! them affects all handles immediately. Color mode and timestamp format are
//! fixed when the configuration is built.
//!
//! ## Environment Variables
//!
//! - `LOGLET_DEBUG`: emit debug messages (`1/0`, `true/false`, `yes/no`, `on/off`)
//! - `LOGLET_TIMESTAMP`: prepend timestamps (same spellings, default: on)
//! - `LOGLET_COLOR`: `auto`, `always` or `never` (default: `auto`)
//! - `LOGLET_TIMESTAMP_FORMAT`: chrono `strftime` pattern
//! - `NO_COLOR`: disables color in `auto` mode (`always` still colors)
//!
//! [`LoggerRegistry`]: crate::logger::LoggerRegistry

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;

use crate::error::{LogletError, LogletResult};
use crate::sink::Stream;
use crate::style::{self, ColorMode};

/// Default timestamp pattern, matching the en-US locale date/time format
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Environment variable names
pub mod vars
{
    /// Enables debug output
    pub const DEBUG: &str = "LOGLET_DEBUG";
    /// Enables timestamps
    pub const TIMESTAMP: &str = "LOGLET_TIMESTAMP";
    /// Color mode
    pub const COLOR: &str = "LOGLET_COLOR";
    /// Timestamp pattern
    pub const TIMESTAMP_FORMAT: &str = "LOGLET_TIMESTAMP_FORMAT";
}

/// Configuration shared by all handles of a registry
#[derive(Debug)]
pub struct LoggerConfig
{
    debug_enabled: AtomicBool,
    timestamp_enabled: AtomicBool,
    color_forced: AtomicBool,
    initial_debug: bool,
    initial_timestamp: bool,
    color_mode: ColorMode,
    stdout_color: OnceCell<bool>,
    stderr_color: OnceCell<bool>,
    timestamp_format: String,
}

impl Default for LoggerConfig
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl LoggerConfig
{
    /// Debug off, timestamps on, automatic color
    #[must_use]
    pub fn new() -> Self
    {
        Self {
            debug_enabled: AtomicBool::new(false),
            timestamp_enabled: AtomicBool::new(true),
            color_forced: AtomicBool::new(false),
            initial_debug: false,
            initial_timestamp: true,
            color_mode: ColorMode::Auto,
            stdout_color: OnceCell::new(),
            stderr_color: OnceCell::new(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Read the configuration from `LOGLET_*` environment variables
    ///
    /// Unset or invalid variables keep their defaults; invalid ones are
    /// reported through `tracing`.
    #[must_use]
    pub fn from_env() -> Self
    {
        let mut config = Self::new();

        if let Some(debug) = env_value(vars::DEBUG, |value| parse_flag(vars::DEBUG, value)) {
            config = config.with_debug(debug);
        }
        if let Some(timestamps) = env_value(vars::TIMESTAMP, |value| parse_flag(vars::TIMESTAMP, value)) {
            config = config.with_timestamps(timestamps);
        }
        if let Some(mode) = env_value(vars::COLOR, str::parse::<ColorMode>) {
            config = config.with_color_mode(mode);
        }
        if let Ok(format) = env::var(vars::TIMESTAMP_FORMAT) {
            if !format.trim().is_empty() {
                config = config.with_timestamp_format(format);
            }
        }

        config
    }

    /// Like [`LoggerConfig::from_env`], but rejects invalid values
    ///
    /// ## Errors
    ///
    /// Returns the first variable that holds an unparseable value.
    pub fn try_from_env() -> LogletResult<Self>
    {
        let mut config = Self::new();

        if let Ok(value) = env::var(vars::DEBUG) {
            config = config.with_debug(parse_flag(vars::DEBUG, &value)?);
        }
        if let Ok(value) = env::var(vars::TIMESTAMP) {
            config = config.with_timestamps(parse_flag(vars::TIMESTAMP, &value)?);
        }
        if let Ok(value) = env::var(vars::COLOR) {
            config = config.with_color_mode(value.parse()?);
        }
        if let Ok(format) = env::var(vars::TIMESTAMP_FORMAT) {
            if !format.trim().is_empty() {
                config = config.with_timestamp_format(format);
            }
        }

        Ok(config)
    }

    /// Set the initial debug flag
    #[must_use]
    pub fn with_debug(mut self, enabled: bool) -> Self
    {
        self.initial_debug = enabled;
        *self.debug_enabled.get_mut() = enabled;
        self
    }

    /// Set the initial timestamp flag
    #[must_use]
    pub fn with_timestamps(mut self, enabled: bool) -> Self
    {
        self.initial_timestamp = enabled;
        *self.timestamp_enabled.get_mut() = enabled;
        self
    }

    /// Set the color mode
    ///
    /// [`ColorMode::Always`] also overrides `NO_COLOR`, as
    /// [`force_color`](LoggerConfig::force_color) does.
    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self
    {
        if mode == ColorMode::Always {
            style::force_ansi_output();
        }
        self.color_mode = mode;
        self.stdout_color = OnceCell::new();
        self.stderr_color = OnceCell::new();
        self
    }

    /// Set the chrono `strftime` pattern used for timestamps
    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self
    {
        self.timestamp_format = format.into();
        self
    }

    /// Whether debug messages are emitted
    pub fn debug_enabled(&self) -> bool
    {
        self.debug_enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable debug messages
    pub fn set_debug_enabled(&self, enabled: bool)
    {
        self.debug_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether lines start with a timestamp
    pub fn timestamp_enabled(&self) -> bool
    {
        self.timestamp_enabled.load(Ordering::Relaxed)
    }

    /// Enable or disable timestamps
    pub fn set_timestamp_enabled(&self, enabled: bool)
    {
        self.timestamp_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Color output from now on, whatever the terminal supports
    pub fn force_color(&self)
    {
        style::force_ansi_output();
        self.color_forced.store(true, Ordering::Relaxed);
    }

    /// Whether lines written to `stream` are colorized
    ///
    /// Terminal detection for [`ColorMode::Auto`] runs once per stream and is cached.
    pub fn color_enabled(&self, stream: Stream) -> bool
    {
        if self.color_forced.load(Ordering::Relaxed) {
            return true;
        }
        let detected = match stream {
            Stream::Stdout => &self.stdout_color,
            Stream::Stderr => &self.stderr_color,
        };
        *detected.get_or_init(|| self.color_mode.enabled(stream))
    }

    /// The configured color mode
    pub fn color_mode(&self) -> ColorMode
    {
        self.color_mode
    }

    /// The chrono `strftime` pattern used for timestamps
    pub fn timestamp_format(&self) -> &str
    {
        &self.timestamp_format
    }

    /// Restore the flags this configuration was built with and drop any forced color
    pub fn reset(&self)
    {
        self.debug_enabled.store(self.initial_debug, Ordering::Relaxed);
        self.timestamp_enabled.store(self.initial_timestamp, Ordering::Relaxed);
        self.color_forced.store(false, Ordering::Relaxed);
    }
}

/// Parse a boolean flag value
///
/// ## Errors
///
/// Returns [`LogletError::InvalidFlag`] for anything but `1/0`, `true/false`,
/// `yes/no` or `on/off` (case-insensitive).
pub fn parse_flag(name: &str, value: &str) -> LogletResult<bool>
{
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LogletError::InvalidFlag {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

fn env_value<T>(name: &str, parse: impl Fn(&str) -> LogletResult<T>) -> Option<T>
{
    let value = env::var(name).ok()?;
    match parse(&value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(variable = name, %err, "ignoring invalid environment value");
            None
        }
    }
}
