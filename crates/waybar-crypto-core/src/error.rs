use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceError;
use crate::MetricId;

/// Configuration errors detected before anything is rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid display option '{value}'")]
    UnknownMetric { value: String },

    #[error("invalid format template '{template}': {reason}")]
    InvalidFormatTemplate { template: String, reason: String },

    #[error("configuration file is not valid TOML: {message}")]
    InvalidToml { message: String },
    #[error("configuration is missing the [general] section")]
    MissingGeneralSection,
    #[error("section [{section}] is invalid: {message}")]
    InvalidSection { section: String, message: String },
    #[error("option '{field}' is required in section [{section}]")]
    MissingField { section: String, field: &'static str },
    #[error("option '{field}' in section [{section}] has an invalid value: {message}")]
    InvalidOption {
        section: String,
        field: String,
        message: String,
    },
    #[error("unknown option '{field}' in section [{section}]")]
    UnknownOption { section: String, field: String },
    #[error(
        "value of option '{field}' for cryptocurrency '{asset}' must be greater than or equal to 0"
    )]
    NegativePrecision { asset: String, field: &'static str },

    #[error("timestamp must be RFC3339: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("currency cannot be empty")]
    EmptyCurrency,
    #[error("no cryptocurrencies configured")]
    NoAssets,
    #[error("no display options configured")]
    NoMetrics,

    #[error(
        "no API key provided in configuration file or with environment variable '{env_var}'"
    )]
    MissingApiKey { env_var: &'static str },
}

/// Lookup failures while rendering a response. Any of these aborts the whole render.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("symbol '{symbol}' not found in API response")]
    SymbolNotFound { symbol: String },
    #[error("currency '{currency}' not found in API response for symbol '{symbol}'")]
    CurrencyNotFound { symbol: String, currency: String },
    #[error("metric '{metric}' missing from API response for symbol '{symbol}'")]
    MissingMetric { symbol: String, metric: MetricId },
}

/// Errors raised while loading a configuration file from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
