//! Resolution error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a flag could not be resolved.
///
/// Every failure that crosses a resolver boundary is reported as exactly one
/// of these variants, always alongside an outcome whose reason is
/// [`Reason::Error`](crate::Reason::Error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No usable client or connection.
    #[error("PROVIDER_NOT_READY: {0}")]
    ProviderNotReady(String),

    /// The requested flag key does not exist.
    #[error("FLAG_NOT_FOUND: {0}")]
    FlagNotFound(String),

    /// The requested value kind does not match the flag's type.
    #[error("TYPE_MISMATCH: {0}")]
    TypeMismatch(String),

    /// Malformed definition, unconvertible context, or undecodable response.
    #[error("PARSE_ERROR: {0}")]
    ParseError(String),

    /// Anything else.
    #[error("GENERAL: {0}")]
    General(String),
}

impl ResolutionError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ProviderNotReady(_) => ErrorCode::ProviderNotReady,
            Self::FlagNotFound(_) => ErrorCode::FlagNotFound,
            Self::TypeMismatch(_) => ErrorCode::TypeMismatch,
            Self::ParseError(_) => ErrorCode::ParseError,
            Self::General(_) => ErrorCode::General,
        }
    }

    /// Get the human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::ProviderNotReady(msg)
            | Self::FlagNotFound(msg)
            | Self::TypeMismatch(msg)
            | Self::ParseError(msg)
            | Self::General(msg) => msg,
        }
    }

    /// Create an error from a code and message.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            ErrorCode::ProviderNotReady => Self::ProviderNotReady(message),
            ErrorCode::FlagNotFound => Self::FlagNotFound(message),
            ErrorCode::TypeMismatch => Self::TypeMismatch(message),
            ErrorCode::ParseError => Self::ParseError(message),
            ErrorCode::General => Self::General(message),
        }
    }
}

/// Discriminant of a [`ResolutionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ProviderNotReady,
    FlagNotFound,
    TypeMismatch,
    ParseError,
    General,
}

impl ErrorCode {
    /// Wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderNotReady => "PROVIDER_NOT_READY",
            Self::FlagNotFound => "FLAG_NOT_FOUND",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::ParseError => "PARSE_ERROR",
            Self::General => "GENERAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = ResolutionError::FlagNotFound("flag 'beta' missing".to_string());
        assert_eq!(err.to_string(), "FLAG_NOT_FOUND: flag 'beta' missing");
    }

    #[test]
    fn test_code_and_message() {
        let err = ResolutionError::ParseError(String::new());
        assert_eq!(err.code(), ErrorCode::ParseError);
        assert_eq!(err.message(), "");
    }

    #[test]
    fn test_from_code_preserves_variant() {
        for code in [
            ErrorCode::ProviderNotReady,
            ErrorCode::FlagNotFound,
            ErrorCode::TypeMismatch,
            ErrorCode::ParseError,
            ErrorCode::General,
        ] {
            let err = ResolutionError::from_code(code, "boom");
            assert_eq!(err.code(), code);
            assert_eq!(err.message(), "boom");
        }
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::TypeMismatch).unwrap();
        assert_eq!(json, "\"TYPE_MISMATCH\"");
    }
}
