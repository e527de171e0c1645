//! Error types for permission engine operations
//!
//! Every failure the engine can report is a distinct variant, so callers can
//! tell "denied" apart from "unsupported" or a storage fault without
//! inspecting messages. "Nothing matched" is never an error: it is an empty
//! result, `false`, or `None`.

use grant_auth::AuthError;
use grant_store::StoreError;
use thiserror::Error;

/// Permission engine error types.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The access token does not resolve to an identity
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The caller lacks the privilege required for the operation or scope
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The operation is intentionally not implemented
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    /// The request parameters are malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The identity resolver failed
    #[error("Identity resolver error: {0}")]
    Identity(String),

    /// The record store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for permission engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

impl From<AuthError> for EngineError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated | AuthError::InvalidToken(_) => EngineError::Unauthenticated,
            AuthError::Internal(message) => EngineError::Identity(message),
        }
    }
}

impl EngineError {
    /// Shorthand for a [`EngineError::Forbidden`] with a reason.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        EngineError::Forbidden(reason.into())
    }

    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, EngineError::Identity(_) | EngineError::Store(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::Unauthenticated => 401,
            EngineError::Forbidden(_) => 403,
            EngineError::Unsupported(_) => 501,
            EngineError::InvalidRequest(_) => 400,
            EngineError::Identity(_) | EngineError::Store(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::Unauthenticated => "UNAUTHENTICATED",
            EngineError::Forbidden(_) => "FORBIDDEN",
            EngineError::Unsupported(_) => "UNSUPPORTED",
            EngineError::InvalidRequest(_) => "INVALID_REQUEST",
            EngineError::Identity(_) => "IDENTITY_ERROR",
            EngineError::Store(_) => "STORE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_map_to_unauthenticated() {
        assert!(matches!(
            EngineError::from(AuthError::Unauthenticated),
            EngineError::Unauthenticated
        ));
        assert!(matches!(
            EngineError::from(AuthError::InvalidToken("empty".into())),
            EngineError::Unauthenticated
        ));
        assert!(matches!(
            EngineError::from(AuthError::Internal("down".into())),
            EngineError::Identity(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(EngineError::Unauthenticated.status_code(), 401);
        assert_eq!(EngineError::forbidden("no").status_code(), 403);
        assert_eq!(EngineError::Unsupported("update").status_code(), 501);
        assert_eq!(
            EngineError::Store(StoreError::ReadFailed("io".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            EngineError::Unauthenticated,
            EngineError::forbidden("no"),
            EngineError::Unsupported("find_one"),
            EngineError::InvalidRequest("bad".into()),
            EngineError::Identity("down".into()),
            EngineError::Store(StoreError::WriteRejected("full".into())),
        ];

        let mut codes: Vec<_> = errors.iter().map(EngineError::error_code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_server_errors() {
        assert!(!EngineError::forbidden("no").is_server_error());
        assert!(EngineError::Identity("down".into()).is_server_error());
    }
}
