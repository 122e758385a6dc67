//! Error types for gateway operations
//!
//! Gateway operations surface errors from all three platform crates plus a
//! small set of request-validation failures of their own. `ErrorBody` is the
//! wire envelope a transport serializes when an operation fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tessera_auth::AuthError;
use tessera_billing::BillingError;
use tessera_directory::DirectoryError;

/// Gateway error types.
///
/// Crate errors pass through unchanged so their status codes, error codes,
/// and messages reach the wire exactly as the owning crate defines them.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Directory failure (users, organizations, relations)
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Authentication or authorization failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Billing failure (subscriptions)
    #[error(transparent)]
    Billing(#[from] BillingError),

    /// Registration with organizations enabled named no organization
    #[error("Either organizationId or organizationName must be provided")]
    MissingOrganizationRef,

    /// Registration with organizations enabled carried no role
    #[error("Organization role must be provided")]
    MissingRole,

    /// Subscription request named no subject
    #[error("Either User or Organization ID is required")]
    MissingSubject,

    /// Subscription request named both subjects
    #[error("Only one of user or organization may be provided")]
    ConflictingSubject,

    /// Organization support is switched off for this deployment
    #[error("Organization support is disabled")]
    OrganizationsDisabled,
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

impl GatewayError {
    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        match self {
            GatewayError::Directory(err) => err.is_server_error(),
            GatewayError::Auth(err) => err.is_server_error(),
            GatewayError::Billing(err) => err.is_server_error(),
            _ => false,
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Directory(err) => err.status_code(),
            GatewayError::Auth(err) => err.status_code(),
            GatewayError::Billing(err) => err.status_code(),

            GatewayError::MissingOrganizationRef
            | GatewayError::MissingRole
            | GatewayError::MissingSubject
            | GatewayError::ConflictingSubject => 400,

            // Reads as an absent surface, matching a deployment that never
            // mounted organization routes
            GatewayError::OrganizationsDisabled => 404,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Directory(err) => err.error_code(),
            GatewayError::Auth(err) => err.error_code(),
            GatewayError::Billing(err) => err.error_code(),

            GatewayError::MissingOrganizationRef => "MISSING_ORGANIZATION",
            GatewayError::MissingRole => "MISSING_ROLE",
            GatewayError::MissingSubject => "MISSING_SUBJECT",
            GatewayError::ConflictingSubject => "CONFLICTING_SUBJECT",
            GatewayError::OrganizationsDisabled => "ORGANIZATIONS_DISABLED",
        }
    }

    /// Render the wire envelope for this error.
    ///
    /// Expired, tampered, and malformed tokens render identically so the
    /// envelope carries no oracle for why verification failed, and server
    /// errors keep their backend detail out of the body.
    pub fn body(&self) -> ErrorBody {
        let message = if self.is_server_error() {
            "Server error".to_string()
        } else if matches!(self, GatewayError::Auth(err) if err.error_code() == "INVALID_TOKEN") {
            "Invalid token".to_string()
        } else {
            self.to_string()
        };

        ErrorBody {
            status: self.status_code(),
            code: self.error_code().to_string(),
            message,
        }
    }
}

/// Wire envelope for a failed operation.
///
/// Transports serialize this as the response body and use `status` for the
/// HTTP status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code
    pub status: u16,

    /// Stable machine-readable code
    pub code: String,

    /// Human-readable message
    pub message: String,
}
