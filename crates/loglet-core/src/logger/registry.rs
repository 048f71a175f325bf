//! Handle registry and the process-wide [`Logger`] facade.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use super::handle::Logging;
use crate::config::LoggerConfig;
use crate::sink::{ConsoleSink, LogSink};

/// State every handle of a registry reads at call time
pub(crate) struct Shared
{
    pub(crate) config: LoggerConfig,
    pub(crate) sink: Arc<dyn LogSink>,
}

/// Owner of the shared configuration and the prefix -> handle cache
///
/// Handles are created lazily on the first request for a prefix and live
/// as long as the registry (or until [`clear`](LoggerRegistry::clear)).
///
/// ## Thread Safety
///
/// The cache is guarded by a `Mutex`, so concurrent first requests for the
/// same prefix still yield a single handle. Flags are atomics.
pub struct LoggerRegistry
{
    shared: Arc<Shared>,
    cache: Mutex<HashMap<String, Arc<Logging>>>,
    internal: Arc<Logging>,
}

impl Default for LoggerRegistry
{
    fn default() -> Self
    {
        Self::new(LoggerConfig::new(), Arc::new(ConsoleSink))
    }
}

impl LoggerRegistry
{
    /// Create a registry writing to `sink`
    pub fn new(config: LoggerConfig, sink: Arc<dyn LogSink>) -> Self
    {
        let shared = Arc::new(Shared { config, sink });
        let internal = Arc::new(Logging::new(None, Arc::clone(&shared)));
        Self {
            shared,
            cache: Mutex::new(HashMap::new()),
            internal,
        }
    }

    /// Default configuration, custom sink
    pub fn with_sink(sink: Arc<dyn LogSink>) -> Self
    {
        Self::new(LoggerConfig::new(), sink)
    }

    /// Configuration read from the environment, console output
    #[must_use]
    pub fn from_env() -> Self
    {
        Self::new(LoggerConfig::from_env(), Arc::new(ConsoleSink))
    }

    /// The handle for `prefix`, created on first use
    ///
    /// Repeated calls with the same prefix return the same `Arc`.
    pub fn with_prefix(&self, prefix: &str) -> Arc<Logging>
    {
        let handle = {
            let mut cache = self.lock_cache();
            if let Some(existing) = cache.get(prefix) {
                return Arc::clone(existing);
            }
            let handle = Arc::new(Logging::new(Some(prefix.to_string()), Arc::clone(&self.shared)));
            cache.insert(prefix.to_string(), Arc::clone(&handle));
            handle
        };

        tracing::trace!(prefix, "registered logger handle");
        handle
    }

    /// The unprefixed handle reserved for library-internal messages
    pub fn internal(&self) -> Arc<Logging>
    {
        Arc::clone(&self.internal)
    }

    /// Shared configuration
    pub fn config(&self) -> &LoggerConfig
    {
        &self.shared.config
    }

    /// Enable or disable debug output for every handle
    pub fn set_debug_enabled(&self, enabled: bool)
    {
        tracing::debug!(enabled, "debug output toggled");
        self.shared.config.set_debug_enabled(enabled);
    }

    /// Enable or disable timestamps for every handle
    pub fn set_timestamp_enabled(&self, enabled: bool)
    {
        tracing::debug!(enabled, "timestamps toggled");
        self.shared.config.set_timestamp_enabled(enabled);
    }

    /// Colorize output regardless of terminal detection
    pub fn force_color(&self)
    {
        tracing::debug!("color forced");
        self.shared.config.force_color();
    }

    /// Whether debug output is enabled
    pub fn is_debug_enabled(&self) -> bool
    {
        self.shared.config.debug_enabled()
    }

    /// Whether timestamps are enabled
    pub fn is_timestamp_enabled(&self) -> bool
    {
        self.shared.config.timestamp_enabled()
    }

    /// Number of cached prefixes
    pub fn len(&self) -> usize
    {
        self.lock_cache().len()
    }

    /// Whether no prefix has been requested yet
    pub fn is_empty(&self) -> bool
    {
        self.lock_cache().is_empty()
    }

    /// Cached prefixes, sorted
    pub fn prefixes(&self) -> Vec<String>
    {
        let mut prefixes: Vec<String> = self.lock_cache().keys().cloned().collect();
        prefixes.sort();
        prefixes
    }

    /// Drop every cached handle
    ///
    /// Handles already handed out keep working; the next request for their
    /// prefix creates a new one.
    pub fn clear(&self)
    {
        self.lock_cache().clear();
    }

    /// Drop cached handles and restore the initial flags
    pub fn reset(&self)
    {
        self.clear();
        self.shared.config.reset();
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, Arc<Logging>>>
    {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for LoggerRegistry
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("LoggerRegistry")
            .field("config", &self.shared.config)
            .field("prefixes", &self.prefixes())
            .finish_non_exhaustive()
    }
}

static GLOBAL: Lazy<LoggerRegistry> = Lazy::new(LoggerRegistry::from_env);

/// Process-wide registry
///
/// A thin facade over a lazily created [`LoggerRegistry`] configured from
/// the environment and writing to the console.
///
/// ```rust,no_run
/// use loglet_core::logger::Logger;
/// use loglet_core::params;
///
/// Logger::set_timestamp_enabled(false);
/// let log = Logger::with_prefix("db");
/// log.warn("slow query: %dms", &params![250]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger;

impl Logger
{
    /// The process-wide registry
    pub fn global() -> &'static LoggerRegistry
    {
        &GLOBAL
    }

    /// The process-wide handle for `prefix`
    pub fn with_prefix(prefix: &str) -> Arc<Logging>
    {
        GLOBAL.with_prefix(prefix)
    }

    /// The process-wide unprefixed handle
    pub fn internal() -> Arc<Logging>
    {
        GLOBAL.internal()
    }

    /// Enable or disable debug output process-wide
    pub fn set_debug_enabled(enabled: bool)
    {
        GLOBAL.set_debug_enabled(enabled);
    }

    /// Enable or disable timestamps process-wide
    pub fn set_timestamp_enabled(enabled: bool)
    {
        GLOBAL.set_timestamp_enabled(enabled);
    }

    /// Colorize process-wide output regardless of terminal detection
    pub fn force_color()
    {
        GLOBAL.force_color();
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::sink::MemorySink;

    fn registry() -> LoggerRegistry
    {
        LoggerRegistry::with_sink(Arc::new(MemorySink::new()))
    }

    #[test]
    fn test_same_prefix_same_handle()
    {
        let registry = registry();
        let first = registry.with_prefix("X");
        let second = registry.with_prefix("X");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_prefixes_distinct_handles()
    {
        let registry = registry();
        let x = registry.with_prefix("X");
        let y = registry.with_prefix("Y");
        assert!(!Arc::ptr_eq(&x, &y));
        assert_eq!(registry.prefixes(), vec!["X", "Y"]);
    }

    #[test]
    fn test_internal_handle_is_not_cached()
    {
        let registry = registry();
        assert!(registry.is_empty());
        assert_eq!(registry.internal().prefix(), None);
        assert!(Arc::ptr_eq(&registry.internal(), &registry.internal()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear_creates_fresh_handles()
    {
        let registry = registry();
        let before = registry.with_prefix("svc");
        registry.clear();
        let after = registry.with_prefix("svc");
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_concurrent_registration_yields_one_handle()
    {
        let registry = Arc::new(registry());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.with_prefix("race"))
            })
            .collect();

        let results: Vec<Arc<Logging>> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
        assert!(results.iter().all(|handle| Arc::ptr_eq(handle, &results[0])));
        assert_eq!(registry.len(), 1);
    }
}
