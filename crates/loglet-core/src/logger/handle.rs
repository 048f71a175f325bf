//! Logging handles.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::Local;
use crossterm::style::Color;

use super::registry::Shared;
use crate::config::DEFAULT_TIMESTAMP_FORMAT;
use crate::error::LogletResult;
use crate::format::{interpolate, Param};
use crate::level::LogLevel;
use crate::style::paint;

/// A logging handle bound to one prefix
///
/// Handles are created by a [`LoggerRegistry`](super::LoggerRegistry) and
/// share its configuration: toggling debug output or timestamps on the
/// registry affects every handle at once.
///
/// [`Logging::log`] is the general entry point; [`info`](Logging::info),
/// [`warn`](Logging::warn), [`error`](Logging::error) and
/// [`debug`](Logging::debug) fix the level.
pub struct Logging
{
    prefix: Option<String>,
    shared: Arc<Shared>,
}

impl Logging
{
    pub(super) fn new(prefix: Option<String>, shared: Arc<Shared>) -> Self
    {
        Self { prefix, shared }
    }

    /// The prefix this handle was created with (`None` for the internal handle)
    pub fn prefix(&self) -> Option<&str>
    {
        self.prefix.as_deref()
    }

    /// Emit `message` at `level`
    ///
    /// Output stream failures are swallowed; use [`Logging::try_log`] to observe them.
    pub fn log(&self, level: LogLevel, message: &str, params: &[Param])
    {
        let _ = self.try_log(level, message, params);
    }

    /// Emit `message` at `level`, reporting stream failures
    ///
    /// ## Errors
    ///
    /// Returns [`LogletError::Io`](crate::error::LogletError::Io) if the sink
    /// rejects the write.
    pub fn try_log(&self, level: LogLevel, message: &str, params: &[Param]) -> LogletResult<()>
    {
        let line = self.render(level, message, params);
        self.shared.sink.write_line(level.stream(), &line)?;
        Ok(())
    }

    /// Informational message, to stdout
    pub fn info(&self, message: &str, params: &[Param])
    {
        self.log(LogLevel::Info, message, params);
    }

    /// Warning, to stderr in yellow
    pub fn warn(&self, message: &str, params: &[Param])
    {
        self.log(LogLevel::Warn, message, params);
    }

    /// Error, to stderr in red
    pub fn error(&self, message: &str, params: &[Param])
    {
        self.log(LogLevel::Error, message, params);
    }

    /// Debug message, to stdout in gray
    ///
    /// A no-op while debug output is disabled: the message is neither
    /// interpolated nor written.
    pub fn debug(&self, message: &str, params: &[Param])
    {
        if self.shared.config.debug_enabled() {
            self.log(LogLevel::Debug, message, params);
        }
    }

    /// Compose the line `log` would write, without writing it
    pub fn render(&self, level: LogLevel, message: &str, params: &[Param]) -> String
    {
        let config = &self.shared.config;
        let colored = config.color_enabled(level.stream());

        let mut line = interpolate(message, params);

        if let Some(color) = level.color() {
            line = paint(&line, color, colored);
        }

        if let Some(prefix) = self.prefix.as_deref().filter(|prefix| !prefix.is_empty()) {
            line = format!("{}{line}", paint(&format!("[{prefix}] "), Color::Cyan, colored));
        }

        if config.timestamp_enabled() {
            let stamp = timestamp(config.timestamp_format());
            line = format!("{}{line}", paint(&format!("[{stamp}] "), Color::White, colored));
        }

        line
    }
}

impl fmt::Debug for Logging
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Logging").field("prefix", &self.prefix).finish_non_exhaustive()
    }
}

/// Current local time in `pattern`, or in the default pattern if `pattern` is malformed
fn timestamp(pattern: &str) -> String
{
    let now = Local::now();
    let mut stamp = String::new();
    if write!(stamp, "{}", now.format(pattern)).is_err() {
        stamp = now.format(DEFAULT_TIMESTAMP_FORMAT).to_string();
    }
    stamp
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_timestamp_custom_pattern()
    {
        let stamp = timestamp("%Y");
        assert_eq!(stamp.len(), 4);
        assert!(stamp.chars().all(|ch| ch.is_ascii_digit()));
    }

    #[test]
    fn test_timestamp_malformed_pattern_falls_back()
    {
        let stamp = timestamp("%Q%!");
        assert!(stamp.contains('/'));
        assert!(stamp.ends_with("AM") || stamp.ends_with("PM"));
    }
}
