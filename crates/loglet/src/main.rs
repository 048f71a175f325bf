use std::process;
use std::sync::Arc;

use clap::Parser;
use loglet_core::style::ColorMode;
use loglet_core::{ConsoleSink, LogLevel, LogSink, LoggerConfig, LoggerRegistry, LogletResult, Param};
use loglet_utils::init_logging_with_registry;
use serde_json::Value;

/// Emit leveled, prefixed, colorized log lines from the command line.
#[derive(Parser, Debug)]
#[command(name = "loglet")]
#[command(version)]
#[command(about = "Emit leveled, prefixed, colorized log lines", long_about = None)]
struct Cli
{
    /// Prefix shown as `[prefix]` before the message
    #[arg(short, long)]
    prefix: Option<String>,

    /// Level to log at (info, warn, error, debug)
    #[arg(short, long, default_value_t = LogLevel::Info)]
    level: LogLevel,

    /// Enable debug output
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Omit the leading timestamp
    #[arg(long, default_value_t = false)]
    no_timestamp: bool,

    /// Color mode (auto, always, never); defaults to LOGLET_COLOR or auto
    #[arg(long)]
    color: Option<ColorMode>,

    /// printf-style message (%s, %d, %i, %f, %j, %o, %O, %c, %%)
    message: String,

    /// Values substituted into the message; extras are appended
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    params: Vec<String>,
}

fn main()
{
    let cli = Cli::parse();
    let registry = Arc::new(build_registry(&cli, Arc::new(ConsoleSink)));

    let diagnostics_level = if registry.is_debug_enabled() { LogLevel::Debug } else { LogLevel::Info };
    if let Err(e) = init_logging_with_registry(Arc::clone(&registry), diagnostics_level) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    if let Err(e) = emit(&cli, &registry) {
        eprintln!("Failed to write log line: {e}");
        process::exit(1);
    }
}

/// Registry configured from the environment, then the command-line overrides
fn build_registry(cli: &Cli, sink: Arc<dyn LogSink>) -> LoggerRegistry
{
    let mut config = LoggerConfig::from_env();
    if cli.debug {
        config = config.with_debug(true);
    }
    if cli.no_timestamp {
        config = config.with_timestamps(false);
    }
    if let Some(mode) = cli.color {
        config = config.with_color_mode(mode);
    }

    let registry = LoggerRegistry::new(config, sink);
    if cli.color == Some(ColorMode::Always) {
        registry.force_color();
    }
    registry
}

/// Write the requested line, and nothing else
fn emit(cli: &Cli, registry: &LoggerRegistry) -> LogletResult<()>
{
    let params: Vec<Param> = cli.params.iter().map(|raw| parse_param(raw)).collect();
    let handle = match cli.prefix.as_deref() {
        Some(prefix) => registry.with_prefix(prefix),
        None => registry.internal(),
    };

    if cli.level == LogLevel::Debug {
        handle.debug(&cli.message, &params);
        return Ok(());
    }
    handle.try_log(cli.level, &cli.message, &params)
}

/// Interpret a command-line value as the most specific parameter type
///
/// Integers, then floats, then JSON literals/containers, then plain text.
fn parse_param(raw: &str) -> Param
{
    if let Ok(value) = raw.parse::<i64>() {
        return Param::Int(value);
    }

    if raw.chars().any(|ch| ch.is_ascii_digit()) {
        if let Ok(value) = raw.parse::<f64>() {
            return Param::Float(value);
        }
    }

    let looks_like_json = matches!(raw, "true" | "false" | "null") || raw.starts_with('{') || raw.starts_with('[');
    if looks_like_json {
        if let Ok(value) = serde_json::from_str::<Value>(raw) {
            return match value {
                Value::Bool(flag) => Param::Bool(flag),
                Value::Null => Param::Null,
                other => Param::Json(other),
            };
        }
    }

    Param::Str(raw.to_string())
}

#[cfg(test)]
mod tests
{
    use loglet_core::MemorySink;
    use loglet_utils::LogletLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    use super::*;

    #[test]
    fn test_parse_param_numbers()
    {
        assert_eq!(parse_param("42"), Param::Int(42));
        assert_eq!(parse_param("-7"), Param::Int(-7));
        assert_eq!(parse_param("2.5"), Param::Float(2.5));
    }

    #[test]
    fn test_parse_param_json()
    {
        assert_eq!(parse_param("true"), Param::Bool(true));
        assert_eq!(parse_param("null"), Param::Null);
        assert_eq!(parse_param(r#"{"a":1}"#), Param::Json(serde_json::json!({"a": 1})));
        assert_eq!(parse_param("[1,2]"), Param::Json(serde_json::json!([1, 2])));
    }

    #[test]
    fn test_parse_param_text()
    {
        assert_eq!(parse_param("world"), Param::Str("world".to_string()));
        assert_eq!(parse_param("inf"), Param::Str("inf".to_string()));
        assert_eq!(parse_param("{broken"), Param::Str("{broken".to_string()));
    }

    #[test]
    fn test_cli_parses_flags()
    {
        let cli = Cli::try_parse_from(["loglet", "--prefix", "svc", "--level", "warn", "--no-timestamp", "hi %s", "there"])
            .unwrap();
        assert_eq!(cli.prefix.as_deref(), Some("svc"));
        assert_eq!(cli.level, LogLevel::Warn);
        assert!(cli.no_timestamp);
        assert_eq!(cli.message, "hi %s");
        assert_eq!(cli.params, vec!["there"]);
    }

    #[test]
    fn test_debug_run_writes_a_single_line()
    {
        let cli = Cli::try_parse_from([
            "loglet",
            "--debug",
            "--no-timestamp",
            "--color",
            "never",
            "-p",
            "svc",
            "hi %s",
            "world",
        ])
        .unwrap();
        let sink = Arc::new(MemorySink::new());
        let registry = Arc::new(build_registry(&cli, sink.clone()));
        assert!(registry.is_debug_enabled());

        let subscriber = Registry::default().with(LogletLayer::with_registry(Arc::clone(&registry)));
        tracing::subscriber::with_default(subscriber, || emit(&cli, &registry).unwrap());

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.stdout(), vec!["[svc] hi world"]);
    }

    #[test]
    fn test_debug_level_is_gated()
    {
        let cli = Cli::try_parse_from(["loglet", "--no-timestamp", "--color", "never", "-l", "debug", "hidden"]).unwrap();
        let sink = Arc::new(MemorySink::new());
        let registry = build_registry(&cli, sink.clone());
        registry.set_debug_enabled(false);
        emit(&cli, &registry).unwrap();
        assert!(sink.is_empty());
    }
}
