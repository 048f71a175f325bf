//! Color handling while `NO_COLOR` is set
//!
//! Lives in its own test binary: it changes the process environment and
//! crossterm's global color switch.

use std::sync::Arc;

use crossterm::style::Colored;
use loglet_core::logger::LoggerRegistry;
use loglet_core::sink::{MemorySink, Stream};
use loglet_core::style::{strip_ansi, terminal_supports_color, ColorMode};
use loglet_core::LoggerConfig;

#[test]
fn test_always_mode_overrides_no_color()
{
    std::env::set_var("NO_COLOR", "1");
    Colored::set_ansi_color_disabled(true);

    assert!(!terminal_supports_color(Stream::Stdout));
    assert!(!terminal_supports_color(Stream::Stderr));
    assert!(!LoggerConfig::new().color_enabled(Stream::Stderr));

    let sink = Arc::new(MemorySink::new());
    let config = LoggerConfig::new().with_timestamps(false).with_color_mode(ColorMode::Always);
    let registry = LoggerRegistry::new(config, sink.clone());
    registry.with_prefix("svc").warn("x", &[]);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].stream, Stream::Stderr);
    assert!(lines[0].line.contains("\u{1b}[38;5;"), "no foreground color in {:?}", lines[0].line);
    assert_eq!(strip_ansi(&lines[0].line), "[svc] x");

    std::env::remove_var("NO_COLOR");
}
