//! Error types for identity resolution
//!
//! This module defines the errors that can occur while resolving an access
//! token to a caller identity.

use thiserror::Error;

/// Authentication error types.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token does not resolve to any identity
    #[error("Unauthenticated: token does not resolve to an identity")]
    Unauthenticated,

    /// The token is malformed
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The resolver backend failed
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Check if this error should be logged at error level.
    ///
    /// Unknown or malformed tokens are expected and should not be logged as
    /// errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AuthError::Internal(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Unauthenticated | AuthError::InvalidToken(_) => 401,
            AuthError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::InvalidToken(_) => "INVALID_TOKEN",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::Unauthenticated.status_code(), 401);
        assert_eq!(AuthError::InvalidToken("empty".into()).status_code(), 401);
        assert_eq!(AuthError::Internal("down".into()).status_code(), 500);
    }

    #[test]
    fn test_server_errors() {
        assert!(!AuthError::Unauthenticated.is_server_error());
        assert!(AuthError::Internal("down".into()).is_server_error());
    }
}
