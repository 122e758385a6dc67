//! Error types for directory operations
//!
//! This module defines all error types that can occur while managing users,
//! organizations, and relations.

use thiserror::Error;

use crate::store::StoreError;

/// Directory error types.
///
/// Expected outcomes (missing entities, duplicate identifiers) are ordinary
/// results of valid calls and map to client-facing status codes; only storage
/// failures are server errors.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Referenced user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Referenced organization does not exist
    #[error("Organization not found")]
    OrganizationNotFound,

    /// Email address is already registered
    #[error("User already exists")]
    DuplicateEmail,

    /// Organization name is already taken
    #[error("Organization already exists")]
    DuplicateOrganizationName,

    /// A relation for this (user, organization) pair already exists
    #[error("User is already a member of this organization")]
    RelationExists,

    /// Password-reset token is unknown or expired
    #[error("Invalid or expired token")]
    InvalidResetToken,

    /// Requesting user does not own any organization
    #[error("The user is not an owner of any organization")]
    NotAnOwner,

    /// Storage failure
    #[error("Storage error: {0}")]
    Store(String),
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

impl DirectoryError {
    /// Check if this error should be logged at error level.
    ///
    /// Missing entities and duplicate identifiers are expected outcomes and
    /// should not be logged as errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self, DirectoryError::Store(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            DirectoryError::UserNotFound | DirectoryError::OrganizationNotFound => 404,

            DirectoryError::DuplicateEmail
            | DirectoryError::DuplicateOrganizationName
            | DirectoryError::RelationExists
            | DirectoryError::InvalidResetToken
            | DirectoryError::NotAnOwner => 400,

            DirectoryError::Store(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::UserNotFound => "USER_NOT_FOUND",
            DirectoryError::OrganizationNotFound => "ORGANIZATION_NOT_FOUND",
            DirectoryError::DuplicateEmail => "USER_EXISTS",
            DirectoryError::DuplicateOrganizationName => "ORGANIZATION_EXISTS",
            DirectoryError::RelationExists => "RELATION_EXISTS",
            DirectoryError::InvalidResetToken => "INVALID_RESET_TOKEN",
            DirectoryError::NotAnOwner => "NOT_AN_OWNER",
            DirectoryError::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<StoreError> for DirectoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => DirectoryError::DuplicateEmail,
            StoreError::DuplicateOrganizationName => DirectoryError::DuplicateOrganizationName,
            StoreError::DuplicateRelation => DirectoryError::RelationExists,
            StoreError::MissingUser => DirectoryError::UserNotFound,
            StoreError::Backend(message) => DirectoryError::Store(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DirectoryError::UserNotFound.status_code(), 404);
        assert_eq!(DirectoryError::OrganizationNotFound.status_code(), 404);
        assert_eq!(DirectoryError::DuplicateEmail.status_code(), 400);
        assert_eq!(DirectoryError::RelationExists.status_code(), 400);
        assert_eq!(DirectoryError::Store("oops".into()).status_code(), 500);
    }

    #[test]
    fn test_store_error_mapping() {
        let err: DirectoryError = StoreError::DuplicateRelation.into();
        assert!(matches!(err, DirectoryError::RelationExists));

        let err: DirectoryError = StoreError::MissingUser.into();
        assert!(matches!(err, DirectoryError::UserNotFound));

        let err: DirectoryError = StoreError::Backend("disk".into()).into();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_expected_outcomes_are_not_server_errors() {
        assert!(!DirectoryError::UserNotFound.is_server_error());
        assert!(!DirectoryError::DuplicateEmail.is_server_error());
        assert!(!DirectoryError::InvalidResetToken.is_server_error());
    }
}
