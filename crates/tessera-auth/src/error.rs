//! Error types for authentication and authorization
//!
//! This module defines all error types that can occur during token
//! verification, credential checks, and authorization decisions.

use thiserror::Error;

use tessera_directory::StoreError;

/// Authentication and authorization error types.
///
/// Token-verification failures stay distinct internally (expiry, signature,
/// shape) so they can be logged and tested separately, but all of them
/// surface the same outward error code; callers can not probe which check a
/// forged token failed.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token was presented
    #[error("No token, authorization denied")]
    MissingToken,

    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature does not verify
    #[error("Invalid token: bad signature")]
    InvalidSignature,

    /// Token is not a well-formed JWT
    #[error("Invalid token: {0}")]
    Malformed(String),

    /// Email/credential pair did not check out
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Principal holds no elevated role in any organization shared with the
    /// target
    #[error("Not authorized as admin or owner in any shared organization")]
    Forbidden,

    /// Storage failure during an authorization lookup
    #[error("Storage error: {0}")]
    Store(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Check if this error should be logged at error level.
    ///
    /// Rejected tokens and failed logins are expected outcomes and should
    /// not be logged as errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AuthError::Store(_) | AuthError::Internal(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingToken
            | AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::Malformed(_)
            | AuthError::InvalidCredentials => 401,

            AuthError::Forbidden => 403,

            AuthError::Store(_) | AuthError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    ///
    /// Expired, tampered, and malformed tokens all collapse to the same
    /// code; the distinction never crosses the API boundary.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "NO_TOKEN",
            AuthError::TokenExpired | AuthError::InvalidSignature | AuthError::Malformed(_) => {
                "INVALID_TOKEN"
            }
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::Store(_) => "STORE_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Backend(message) => AuthError::Store(message),
            other => AuthError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_collapse_to_one_code() {
        assert_eq!(AuthError::TokenExpired.error_code(), "INVALID_TOKEN");
        assert_eq!(AuthError::InvalidSignature.error_code(), "INVALID_TOKEN");
        assert_eq!(
            AuthError::Malformed("not a jwt".into()).error_code(),
            "INVALID_TOKEN"
        );
        // Missing token stays distinguishable
        assert_eq!(AuthError::MissingToken.error_code(), "NO_TOKEN");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::MissingToken.status_code(), 401);
        assert_eq!(AuthError::TokenExpired.status_code(), 401);
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::Forbidden.status_code(), 403);
        assert_eq!(AuthError::Internal("oops".into()).status_code(), 500);
    }

    #[test]
    fn test_forbidden_reason() {
        assert_eq!(
            AuthError::Forbidden.to_string(),
            "Not authorized as admin or owner in any shared organization"
        );
    }
}
