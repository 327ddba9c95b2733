use std::fmt::{Display, Formatter};

/// Data-source error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// The request did not complete within its timeout.
    Timeout,
    /// Connection or protocol failure before a response arrived.
    Transport,
    /// The body could not be decoded.
    InvalidResponse,
    /// The provider answered with a non-success status.
    Api,
}

/// Structured failure from the quote provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    error_code: Option<i64>,
}

impl SourceError {
    pub fn timeout() -> Self {
        Self {
            kind: SourceErrorKind::Timeout,
            message: String::from("request timed out"),
            error_code: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Transport,
            message: message.into(),
            error_code: None,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidResponse,
            message: message.into(),
            error_code: None,
        }
    }

    /// Provider-reported failure; code and message are kept verbatim.
    pub fn api(message: impl Into<String>, error_code: Option<i64>) -> Self {
        Self {
            kind: SourceErrorKind::Api,
            message: message.into(),
            error_code,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn error_code(&self) -> Option<i64> {
        self.error_code
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.kind, self.error_code) {
            (SourceErrorKind::Api, Some(code)) => write!(f, "{} ({code})", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SourceError {}
