use std::path::PathBuf;

use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config file not found: '{}'", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error(transparent)]
    Config(#[from] waybar_crypto_core::ConfigError),

    #[error(transparent)]
    Validation(#[from] waybar_crypto_core::ValidationError),

    #[error("failed to fetch quotes: {0}")]
    Source(#[from] waybar_crypto_core::SourceError),

    #[error(transparent)]
    Render(#[from] waybar_crypto_core::RenderError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigNotFound { .. } => 2,
            Self::Config(_) => 2,
            Self::Validation(_) => 2,
            Self::Source(_) => 3,
            Self::Render(_) => 4,
            Self::Serialization(_) => 5,
            Self::Io(_) => 10,
            Self::Logging(_) => 1,
        }
    }
}
