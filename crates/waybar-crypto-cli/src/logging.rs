//! Diagnostic logging to stderr.
//!
//! Stdout carries exactly one JSON document for Waybar, so every event goes to stderr.

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{LogFormat, LogLevel};
use crate::error::CliError;

pub const LOG_ENV: &str = "WAYBAR_CRYPTO_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber.
///
/// The `--log-level` flag wins over `WAYBAR_CRYPTO_LOG`, which wins over `warn`.
pub fn init(level: Option<LogLevel>, format: LogFormat) -> Result<(), CliError> {
    let filter = build_filter(level, std::env::var(LOG_ENV).ok())?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|error| CliError::Logging(error.to_string()))
}

fn build_filter(level: Option<LogLevel>, env_value: Option<String>) -> Result<EnvFilter, CliError> {
    let directive = directive(level, env_value);
    EnvFilter::try_new(&directive)
        .map_err(|error| CliError::Logging(format!("invalid filter '{directive}': {error}")))
}

fn directive(level: Option<LogLevel>, env_value: Option<String>) -> String {
    match (level, env_value) {
        (Some(level), _) => level.as_str().to_owned(),
        (None, Some(value)) if !value.trim().is_empty() => value,
        _ => DEFAULT_DIRECTIVE.to_owned(),
    }
}
