//! # Error Types
//!
//! Errors surfaced by the fallible corners of Loglet: parsing configuration
//! values and observing output stream failures through [`Logging::try_log`].
//!
//! Logging itself never fails from the caller's point of view; these errors
//! only appear on the explicit `try_*` and `FromStr` paths.
//!
//! [`Logging::try_log`]: crate::logger::Logging::try_log

use thiserror::Error;

/// Main error type for Loglet operations
#[derive(Error, Debug)]
pub enum LogletError
{
    /// A log level string did not name one of `info`, `warn`, `error`, `debug`
    #[error("Unknown log level: {0}. Use 'info', 'warn', 'error', or 'debug'")]
    InvalidLevel(String),

    /// A color mode string did not name one of `auto`, `always`, `never`
    #[error("Unknown color mode: {0}. Use 'auto', 'always', or 'never'")]
    InvalidColorMode(String),

    /// A boolean flag value could not be interpreted
    ///
    /// Accepted spellings are `1/0`, `true/false`, `yes/no` and `on/off`.
    #[error("Invalid value for {name}: {value}")]
    InvalidFlag
    {
        /// Name of the flag (usually the environment variable)
        name: String,
        /// The rejected value
        value: String,
    },

    /// Writing to the selected output stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, LogletError>`
///
/// ```rust
/// use loglet_core::error::LogletResult;
/// fn foo() -> LogletResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type LogletResult<T> = std::result::Result<T, LogletError>;
