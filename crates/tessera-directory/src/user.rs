//! User domain models
//!
//! This module provides the core User entity. Users are the principals of the
//! platform: they authenticate with an email/credential pair, belong to any
//! number of organizations, and are the subjects of authorization decisions.
//!
//! Credential material is opaque to this crate. Callers hand in an
//! already-hashed credential and compare candidates through an injected
//! verifier; no hashing happens here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pending password-reset state attached to a user.
///
/// Only a digest of the reset token is stored; the raw token is handed to the
/// caller once at creation and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordReset {
    /// SHA-256 digest of the reset token (base64, URL-safe, no padding)
    pub token_digest: String,

    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl PasswordReset {
    /// Check if the reset token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// A user account.
///
/// Users are never hard-deleted; every stored identifier in a relation or
/// subscription is expected to stay resolvable.
///
/// # Examples
///
/// ```
/// use tessera_directory::User;
///
/// let user = User::new("jo@example.com", "$argon2id$...", "Jo", "Smith");
/// assert_eq!(user.email, "jo@example.com");
/// assert!(user.organizations.is_empty());
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address (unique across the platform)
    pub email: String,

    /// Opaque credential hash produced by an external hashing collaborator
    pub credential_hash: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Organizations this user belongs to (order carries no meaning)
    #[serde(default)]
    pub organizations: Vec<Uuid>,

    /// Pending password-reset token, if one was issued
    pub password_reset: Option<PasswordReset>,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("credential_hash", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("organizations", &self.organizations)
            .finish()
    }
}

impl User {
    /// Creates a new user.
    ///
    /// The user is created with:
    /// - A newly generated UUID v7 ID
    /// - No organization memberships
    /// - No pending password reset
    /// - Current timestamp for created_at and updated_at
    ///
    /// # Arguments
    ///
    /// * `email` - Email address (must be unique; enforced by the store)
    /// * `credential_hash` - Pre-hashed credential, opaque to this crate
    /// * `first_name` - Given name
    /// * `last_name` - Family name
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_directory::User;
    ///
    /// let user = User::new("jo@example.com", "$argon2id$...", "Jo", "Smith");
    /// ```
    pub fn new(
        email: impl Into<String>,
        credential_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            credential_hash: credential_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            organizations: Vec::new(),
            password_reset: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this user belongs to the given organization.
    pub fn is_member_of(&self, organization_id: Uuid) -> bool {
        self.organizations.contains(&organization_id)
    }

    /// Record membership in an organization.
    ///
    /// Appending is idempotent; the membership set never holds duplicates.
    ///
    /// # Arguments
    ///
    /// * `organization_id` - The organization to record
    pub fn add_organization(&mut self, organization_id: Uuid) {
        if !self.organizations.contains(&organization_id) {
            self.organizations.push(organization_id);
            self.updated_at = Utc::now();
        }
    }

    /// Build the wire-safe profile view of this user.
    ///
    /// The profile carries everything a client may see; credential material
    /// and reset-token state never leave this crate.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            organizations: self.organizations.clone(),
            created_at: self.created_at,
        }
    }
}

/// Wire-safe view of a user for API responses.
///
/// Field names follow the public API contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Given name
    #[serde(rename = "firstName")]
    pub first_name: String,

    /// Family name
    #[serde(rename = "lastName")]
    pub last_name: String,

    /// Organization memberships
    pub organizations: Vec<Uuid>,

    /// When the user was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("jo@example.com", "hash", "Jo", "Smith");

        assert_eq!(user.email, "jo@example.com");
        assert_eq!(user.first_name, "Jo");
        assert_eq!(user.last_name, "Smith");
        assert!(user.organizations.is_empty());
        assert!(user.password_reset.is_none());
    }

    #[test]
    fn test_add_organization_idempotent() {
        let mut user = User::new("jo@example.com", "hash", "Jo", "Smith");
        let org_id = Uuid::now_v7();

        user.add_organization(org_id);
        user.add_organization(org_id);

        assert_eq!(user.organizations.len(), 1);
        assert!(user.is_member_of(org_id));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let user = User::new("jo@example.com", "super-secret-hash", "Jo", "Smith");
        let output = format!("{:?}", user);

        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("super-secret-hash"));
    }

    #[test]
    fn test_profile_excludes_credential() {
        let user = User::new("jo@example.com", "hash", "Jo", "Smith");
        let json = serde_json::to_value(user.profile()).unwrap();

        assert_eq!(json["email"], "jo@example.com");
        assert_eq!(json["firstName"], "Jo");
        assert_eq!(json["lastName"], "Smith");
        assert!(json.get("credential_hash").is_none());
        assert!(json.get("password_reset").is_none());
    }

    #[test]
    fn test_password_reset_expiry() {
        let expired = PasswordReset {
            token_digest: "digest".to_string(),
            expires_at: Utc::now() - chrono::Duration::minutes(1),
        };
        assert!(expired.is_expired());

        let live = PasswordReset {
            token_digest: "digest".to_string(),
            expires_at: Utc::now() + chrono::Duration::hours(1),
        };
        assert!(!live.is_expired());
    }
}
