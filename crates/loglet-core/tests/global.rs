//! Tests for the process-wide `Logger` facade
//!
//! Everything touching global flags lives in a single test so parallel test
//! threads cannot observe each other's changes.

use std::sync::Arc;

use loglet_core::logger::Logger;
use loglet_core::Stream;

#[test]
fn test_global_facade()
{
    let x = Logger::with_prefix("X");
    assert!(Arc::ptr_eq(&x, &Logger::with_prefix("X")));
    assert!(!Arc::ptr_eq(&x, &Logger::with_prefix("Y")));
    assert_eq!(x.prefix(), Some("X"));

    assert_eq!(Logger::internal().prefix(), None);
    assert!(Arc::ptr_eq(&Logger::internal(), &Logger::global().internal()));

    Logger::set_debug_enabled(true);
    assert!(Logger::global().is_debug_enabled());
    Logger::set_timestamp_enabled(false);
    assert!(!Logger::global().is_timestamp_enabled());
    Logger::force_color();
    assert!(Logger::global().config().color_enabled(Stream::Stdout));

    Logger::global().reset();
    assert!(Logger::global().is_empty());
}
