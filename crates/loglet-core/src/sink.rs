//! # Output Sinks
//!
//! Where composed log lines end up.
//!
//! Every log call produces exactly one [`LogSink::write_line`] call. The
//! [`ConsoleSink`] writes to the process's stdout/stderr; the [`MemorySink`]
//! keeps the lines in memory so tests can inspect them.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::style::strip_ansi;

/// Output stream a line is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream
{
    /// Standard output
    Stdout,
    /// Standard error
    Stderr,
}

impl fmt::Display for Stream
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        })
    }
}

/// Destination for composed log lines
pub trait LogSink: Send + Sync
{
    /// Write one complete line (without trailing newline) to `stream`
    ///
    /// ## Errors
    ///
    /// Returns the underlying I/O error if the stream rejects the write.
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()>;
}

/// Sink writing to the process's standard streams
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink
{
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()>
    {
        // A single write per line keeps concurrent lines from interleaving.
        let mut buffer = String::with_capacity(line.len() + 1);
        buffer.push_str(line);
        buffer.push('\n');

        match stream {
            Stream::Stdout => io::stdout().lock().write_all(buffer.as_bytes()),
            Stream::Stderr => io::stderr().lock().write_all(buffer.as_bytes()),
        }
    }
}

/// A line captured by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine
{
    /// Stream the line was routed to
    pub stream: Stream,
    /// The line as written, escape codes included
    pub line: String,
}

impl CapturedLine
{
    /// The line with color escape codes removed
    pub fn plain(&self) -> String
    {
        strip_ansi(&self.line)
    }
}

/// Sink that records lines in memory
///
/// ```rust
/// use loglet_core::sink::{LogSink, MemorySink, Stream};
///
/// let sink = MemorySink::new();
/// sink.write_line(Stream::Stderr, "oops").unwrap();
/// assert_eq!(sink.stderr(), vec!["oops".to_string()]);
/// assert!(sink.stdout().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemorySink
{
    lines: Mutex<Vec<CapturedLine>>,
}

impl MemorySink
{
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// All captured lines, in write order
    pub fn lines(&self) -> Vec<CapturedLine>
    {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Plain text of the lines written to stdout
    pub fn stdout(&self) -> Vec<String>
    {
        self.plain_for(Stream::Stdout)
    }

    /// Plain text of the lines written to stderr
    pub fn stderr(&self) -> Vec<String>
    {
        self.plain_for(Stream::Stderr)
    }

    /// Number of captured lines
    pub fn len(&self) -> usize
    {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been captured
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    /// Forget all captured lines
    pub fn clear(&self)
    {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn plain_for(&self, stream: Stream) -> Vec<String>
    {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|captured| captured.stream == stream)
            .map(CapturedLine::plain)
            .collect()
    }
}

impl LogSink for MemorySink
{
    fn write_line(&self, stream: Stream, line: &str) -> io::Result<()>
    {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedLine {
                stream,
                line: line.to_string(),
            });
        Ok(())
    }
}
