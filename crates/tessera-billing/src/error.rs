//! Error types for subscription management

use thiserror::Error;

use crate::store::StoreError;

/// Billing error types.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Referenced subscription does not exist
    #[error("Subscription not found")]
    SubscriptionNotFound,

    /// Subject user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Subject organization does not exist
    #[error("Organization not found")]
    OrganizationNotFound,

    /// Requester holds no relation to the organization
    #[error("Not authorized to access this organization")]
    NotAMember,

    /// Storage failure
    #[error("Storage error: {0}")]
    Store(String),
}

/// Result type for billing operations.
pub type BillingResult<T> = Result<T, BillingError>;

impl BillingError {
    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, BillingError::Store(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            BillingError::SubscriptionNotFound
            | BillingError::UserNotFound
            | BillingError::OrganizationNotFound => 404,

            BillingError::NotAMember => 403,

            BillingError::Store(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            BillingError::SubscriptionNotFound => "SUBSCRIPTION_NOT_FOUND",
            BillingError::UserNotFound => "USER_NOT_FOUND",
            BillingError::OrganizationNotFound => "ORGANIZATION_NOT_FOUND",
            BillingError::NotAMember => "FORBIDDEN",
            BillingError::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<StoreError> for BillingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingSubscription => BillingError::SubscriptionNotFound,
            StoreError::Backend(message) => BillingError::Store(message),
        }
    }
}

impl From<tessera_directory::StoreError> for BillingError {
    fn from(err: tessera_directory::StoreError) -> Self {
        match err {
            tessera_directory::StoreError::Backend(message) => BillingError::Store(message),
            other => BillingError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BillingError::SubscriptionNotFound.status_code(), 404);
        assert_eq!(BillingError::NotAMember.status_code(), 403);
        assert_eq!(BillingError::Store("down".into()).status_code(), 500);
    }

    #[test]
    fn test_membership_guard_message() {
        assert_eq!(
            BillingError::NotAMember.to_string(),
            "Not authorized to access this organization"
        );
    }

    #[test]
    fn test_store_error_conversion() {
        let err: BillingError = StoreError::MissingSubscription.into();
        assert!(matches!(err, BillingError::SubscriptionNotFound));
        assert!(!err.is_server_error());

        let err: BillingError = StoreError::Backend("socket closed".into()).into();
        assert!(err.is_server_error());
    }
}
