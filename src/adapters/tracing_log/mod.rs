// Tracing log adapter - Structured logging using tracing crate

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::domain::errors::*;

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Validate a log level name
pub fn parse_level(level: &str) -> Result<tracing::Level, PipelineError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(tracing::Level::TRACE),
        "debug" => Ok(tracing::Level::DEBUG),
        "info" => Ok(tracing::Level::INFO),
        "warn" => Ok(tracing::Level::WARN),
        "error" => Ok(tracing::Level::ERROR),
        _ => Err(PipelineError::Config(format!(
            "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
            level
        ))),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. Logs go to stderr so that
/// stdout stays free for the JSON report.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), PipelineError> {
    let level = parse_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    Ok(())
}
