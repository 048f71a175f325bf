//! Color rendering and terminal capability detection.

use std::fmt;
use std::io;
use std::str::FromStr;

use crossterm::style::{style, Color, Colored, Stylize};
use crossterm::tty::IsTty;

use crate::error::LogletError;
use crate::sink::Stream;

/// When to emit color escape codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode
{
    /// Color when the output stream is a terminal and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorMode
{
    /// Resolve the mode for `stream` against the current process environment
    pub fn enabled(self, stream: Stream) -> bool
    {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => terminal_supports_color(stream),
        }
    }
}

impl fmt::Display for ColorMode
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        })
    }
}

impl FromStr for ColorMode
{
    type Err = LogletError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "force" | "on" => Ok(ColorMode::Always),
            "never" | "off" | "none" => Ok(ColorMode::Never),
            _ => Err(LogletError::InvalidColorMode(s.to_string())),
        }
    }
}

/// Whether `stream` looks like a color-capable terminal
///
/// Honors the `NO_COLOR` convention: any non-empty value disables color.
pub fn terminal_supports_color(stream: Stream) -> bool
{
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
    if no_color {
        return false;
    }
    match stream {
        Stream::Stdout => io::stdout().is_tty(),
        Stream::Stderr => io::stderr().is_tty(),
    }
}

/// Make crossterm emit escape codes even if `NO_COLOR` is set
pub(crate) fn force_ansi_output()
{
    Colored::set_ansi_color_disabled(false);
}

/// Wrap `text` in the escape codes for `color` when `enabled`
pub fn paint(text: &str, color: Color, enabled: bool) -> String
{
    if enabled {
        style(text).with(color).to_string()
    } else {
        text.to_string()
    }
}

/// Remove CSI escape sequences (`ESC [ ... final`) from `text`
pub fn strip_ansi(text: &str) -> String
{
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&next) {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}
