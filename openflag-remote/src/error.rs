//! Remote resolution error types.

use openflag_core::ResolutionError;
use thiserror::Error;
use tonic::{Code, Status};

/// Message reported when no connection to the flag service exists.
pub const CONNECTION_ERROR: &str = "connection not made";

/// Evaluation context conversion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// Number that has no double-precision representation.
    #[error("context attribute '{key}' holds a number that is not representable as a double: {number}")]
    UnrepresentableNumber { key: String, number: String },

    /// Nesting deeper than the wire format accepts.
    #[error("context attribute '{key}' exceeds the maximum nesting depth of {limit}")]
    TooDeep { key: String, limit: usize },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Environment variable holds an unusable value.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Map a failed call's status to a resolution error.
pub fn resolution_error(status: &Status) -> ResolutionError {
    let message = if status.message().is_empty() {
        status.code().description().to_string()
    } else {
        status.message().to_string()
    };

    match status.code() {
        Code::Unavailable => ResolutionError::ProviderNotReady(CONNECTION_ERROR.to_string()),
        Code::NotFound => ResolutionError::FlagNotFound(message),
        Code::InvalidArgument => ResolutionError::TypeMismatch(message),
        Code::DataLoss => ResolutionError::ParseError(message),
        Code::Ok
        | Code::Cancelled
        | Code::Unknown
        | Code::DeadlineExceeded
        | Code::AlreadyExists
        | Code::PermissionDenied
        | Code::ResourceExhausted
        | Code::FailedPrecondition
        | Code::Aborted
        | Code::OutOfRange
        | Code::Unimplemented
        | Code::Internal
        | Code::Unauthenticated => ResolutionError::General(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openflag_core::ErrorCode;

    #[test]
    fn test_mapped_codes() {
        let cases = [
            (Code::Unavailable, ErrorCode::ProviderNotReady),
            (Code::NotFound, ErrorCode::FlagNotFound),
            (Code::InvalidArgument, ErrorCode::TypeMismatch),
            (Code::DataLoss, ErrorCode::ParseError),
        ];

        for (code, expected) in cases {
            let err = resolution_error(&Status::new(code, "upstream said no"));
            assert_eq!(err.code(), expected, "{code:?}");
        }
    }

    #[test]
    fn test_unavailable_uses_connection_message() {
        let err = resolution_error(&Status::unavailable("tcp connect error"));
        assert_eq!(err, ResolutionError::ProviderNotReady(CONNECTION_ERROR.to_string()));
    }

    #[test]
    fn test_underlying_message_is_kept() {
        let err = resolution_error(&Status::not_found("flag 'beta' not found"));
        assert_eq!(err, ResolutionError::FlagNotFound("flag 'beta' not found".to_string()));
    }

    #[test]
    fn test_other_codes_are_general() {
        for code in [
            Code::Ok,
            Code::Cancelled,
            Code::Unknown,
            Code::DeadlineExceeded,
            Code::AlreadyExists,
            Code::PermissionDenied,
            Code::ResourceExhausted,
            Code::FailedPrecondition,
            Code::Aborted,
            Code::OutOfRange,
            Code::Unimplemented,
            Code::Internal,
            Code::Unauthenticated,
        ] {
            let err = resolution_error(&Status::new(code, "boom"));
            assert_eq!(err, ResolutionError::General("boom".to_string()), "{code:?}");
        }
    }

    #[test]
    fn test_empty_message_falls_back_to_description() {
        let err = resolution_error(&Status::new(Code::Internal, ""));
        assert_eq!(err.code(), ErrorCode::General);
        assert!(!err.message().is_empty());
    }

    #[test]
    fn test_context_error_display() {
        let err = ContextError::TooDeep {
            key: "tree".to_string(),
            limit: 100,
        };
        assert_eq!(
            err.to_string(),
            "context attribute 'tree' exceeds the maximum nesting depth of 100"
        );
    }
}
