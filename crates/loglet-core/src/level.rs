//! Log levels and their routing/color policy.

use std::fmt;
use std::str::FromStr;

use crossterm::style::Color;

use crate::error::LogletError;
use crate::sink::Stream;

/// Log level
///
/// A closed set. Unlike most leveled loggers there is no ordering between
/// levels: `Debug` is gated by its own flag, the others are always emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogLevel
{
    /// Informational message (default)
    #[default]
    Info,
    /// Warning message
    Warn,
    /// Error message
    Error,
    /// Debug message, only emitted while debug output is enabled
    Debug,
}

impl LogLevel
{
    /// All levels, in declaration order
    pub const ALL: [LogLevel; 4] = [LogLevel::Info, LogLevel::Warn, LogLevel::Error, LogLevel::Debug];

    /// Lowercase name of the level
    pub const fn as_str(self) -> &'static str
    {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Debug => "debug",
        }
    }

    /// Output stream for this level
    ///
    /// Warnings and errors go to stderr, everything else to stdout.
    pub const fn stream(self) -> Stream
    {
        match self {
            LogLevel::Warn | LogLevel::Error => Stream::Stderr,
            LogLevel::Info | LogLevel::Debug => Stream::Stdout,
        }
    }

    /// Color applied to the message body, if any
    pub const fn color(self) -> Option<Color>
    {
        match self {
            LogLevel::Warn => Some(Color::Yellow),
            LogLevel::Error => Some(Color::Red),
            LogLevel::Debug => Some(Color::DarkGrey),
            LogLevel::Info => None,
        }
    }
}

impl fmt::Display for LogLevel
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel
{
    type Err = LogletError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            _ => Err(LogletError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARNING").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("err").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str(" dbg ").unwrap(), LogLevel::Debug);
        assert!(LogLevel::from_str("trace").is_err());
    }

    #[test]
    fn test_log_level_display_round_trips()
    {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_log_level_stream_routing()
    {
        assert_eq!(LogLevel::Info.stream(), Stream::Stdout);
        assert_eq!(LogLevel::Debug.stream(), Stream::Stdout);
        assert_eq!(LogLevel::Warn.stream(), Stream::Stderr);
        assert_eq!(LogLevel::Error.stream(), Stream::Stderr);
    }

    #[test]
    fn test_log_level_colors()
    {
        assert_eq!(LogLevel::Info.color(), None);
        assert_eq!(LogLevel::Warn.color(), Some(Color::Yellow));
        assert_eq!(LogLevel::Error.color(), Some(Color::Red));
        assert_eq!(LogLevel::Debug.color(), Some(Color::DarkGrey));
    }
}
