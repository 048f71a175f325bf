//! Tests for forwarding `tracing` events to Loglet handles

use std::sync::Arc;

use loglet_core::sink::MemorySink;
use loglet_core::style::ColorMode;
use loglet_core::{LoggerConfig, LoggerRegistry};
use loglet_utils::LogletLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

fn capture<F: FnOnce()>(layer: impl FnOnce(Arc<LoggerRegistry>) -> LogletLayer, f: F) -> (Arc<LoggerRegistry>, Arc<MemorySink>)
{
    let sink = Arc::new(MemorySink::new());
    let config = LoggerConfig::new().with_timestamps(false).with_color_mode(ColorMode::Never);
    let registry = Arc::new(LoggerRegistry::new(config, sink.clone()));

    let subscriber = Registry::default().with(layer(Arc::clone(&registry)));
    tracing::subscriber::with_default(subscriber, f);

    (registry, sink)
}

#[test]
fn test_event_target_becomes_prefix()
{
    let (registry, sink) = capture(LogletLayer::with_registry, || {
        tracing::info!(target: "svc", "hello {}", "world");
    });

    assert_eq!(sink.stdout(), vec!["[svc] hello world"]);
    assert_eq!(registry.prefixes(), vec!["svc"]);
}

#[test]
fn test_fields_are_appended()
{
    let (_, sink) = capture(LogletLayer::with_registry, || {
        tracing::warn!(target: "db", table = "users", rows = 3, "slow scan");
    });

    assert_eq!(sink.stderr(), vec!["[db] slow scan table=users rows=3"]);
}

#[test]
fn test_display_fields_and_error_level()
{
    let (_, sink) = capture(LogletLayer::with_registry, || {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        tracing::error!(target: "io", error = %err, "write failed");
    });

    assert_eq!(sink.stderr(), vec!["[io] write failed error=disk full"]);
}

#[test]
fn test_debug_events_respect_debug_flag()
{
    let (registry, sink) = capture(LogletLayer::with_registry, || {
        tracing::debug!(target: "svc", "hidden");
        tracing::trace!(target: "svc", "also hidden");
    });
    assert!(sink.is_empty());

    registry.set_debug_enabled(true);
    let subscriber = Registry::default().with(LogletLayer::with_registry(Arc::clone(&registry)));
    tracing::subscriber::with_default(subscriber, || {
        tracing::trace!(target: "svc", "shown");
    });
    assert_eq!(sink.stdout(), vec!["[svc] shown"]);
}

#[test]
fn test_unprefixed_layer_uses_internal_handle()
{
    let (registry, sink) = capture(|registry| LogletLayer::with_registry(registry).unprefixed(), || {
        tracing::info!(target: "svc", "no prefix");
    });

    assert_eq!(sink.stdout(), vec!["no prefix"]);
    assert!(registry.is_empty());
}

#[test]
fn test_percent_signs_are_not_interpolated()
{
    let (_, sink) = capture(LogletLayer::with_registry, || {
        tracing::info!(target: "svc", "100% done, %s stays");
    });

    assert_eq!(sink.stdout(), vec!["[svc] 100% done, %s stays"]);
}

#[test]
fn test_own_diagnostics_are_not_forwarded()
{
    let (_, sink) = capture(LogletLayer::with_registry, || {
        tracing::info!(target: "loglet_core::logger", "internal");
    });

    assert!(sink.is_empty());
}
