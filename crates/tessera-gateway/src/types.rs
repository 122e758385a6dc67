//! Request and response types for gateway operations
//!
//! Field names follow the public API contract; transports can deserialize
//! request bodies straight into these types and serialize the responses
//! without reshaping. Secrets never appear in `Debug` output.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tessera_billing::{Subscription, SubscriptionSubject, Term, Tier};
use tessera_directory::{Organization, Relation, Role, UserProfile};

use crate::error::{GatewayError, GatewayResult};

// ============================================================================
// Requests
// ============================================================================

/// Payload for registering a new user.
///
/// The organization fields only matter when organization support is enabled:
/// exactly one of `organization_id` (join) or `organization_name` (found)
/// must then be present, along with the role to hold. When both are given,
/// the ID wins.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address
    pub email: String,

    /// Plaintext password, hashed before it reaches storage
    pub password: String,

    /// Given name
    #[serde(rename = "firstName")]
    pub first_name: String,

    /// Family name
    #[serde(rename = "lastName")]
    pub last_name: String,

    /// Existing organization to join
    #[serde(rename = "organizationId", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,

    /// Name for a newly founded organization
    #[serde(rename = "organizationName", skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,

    /// Role to hold in the organization
    #[serde(rename = "organizationRole", skip_serializing_if = "Option::is_none")]
    pub organization_role: Option<Role>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("organization_id", &self.organization_id)
            .field("organization_name", &self.organization_name)
            .field("organization_role", &self.organization_role)
            .finish()
    }
}

/// Payload for logging in.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Plaintext password
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Payload for updating a user's name fields.
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New given name
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// New family name
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Payload for starting a password reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Email address of the account
    pub email: String,
}

/// Payload for completing a password reset.
#[derive(Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// Raw reset token from the forgot-password step
    pub token: String,

    /// New plaintext password
    pub password: String,
}

impl std::fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("token", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Payload for creating an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    /// Organization name (must be unique)
    pub name: String,

    /// User who will own the organization
    #[serde(rename = "ownerUserId")]
    pub owner_user_id: Uuid,
}

/// Payload for adding a user to an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRelationRequest {
    /// User to add
    pub user: Uuid,

    /// Organization to add them to
    pub organization: Uuid,

    /// Role they will hold
    pub role: Role,
}

/// Payload for creating a subscription.
///
/// Exactly one of `user` and `organization` must be present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    /// Subscription tier
    pub tier: Tier,

    /// Billing term
    pub term: Term,

    /// Subject user, for personal subscriptions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Uuid>,

    /// Subject organization, for tenant-wide subscriptions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Uuid>,

    /// External billing reference
    #[serde(rename = "stripeCustomerID", skip_serializing_if = "Option::is_none")]
    pub stripe_customer_id: Option<String>,
}

impl CreateSubscriptionRequest {
    /// Resolve the tagged subject from the two optional ID fields.
    ///
    /// # Returns
    ///
    /// The subject, [`GatewayError::MissingSubject`] when neither field is
    /// present, or [`GatewayError::ConflictingSubject`] when both are.
    pub fn subject(&self) -> GatewayResult<SubscriptionSubject> {
        match (self.user, self.organization) {
            (Some(user_id), None) => Ok(SubscriptionSubject::User(user_id)),
            (None, Some(organization_id)) => {
                Ok(SubscriptionSubject::Organization(organization_id))
            }
            (None, None) => Err(GatewayError::MissingSubject),
            (Some(_), Some(_)) => Err(GatewayError::ConflictingSubject),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Response carrying a freshly minted access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed bearer token
    pub token: String,
}

/// Response for a completed registration.
///
/// The organization fields are only present when the registration joined or
/// founded one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Outcome message
    pub message: String,

    /// The created user
    pub user: UserProfile,

    /// The organization joined or founded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,

    /// The membership relation created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
}

/// Response for a profile update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdated {
    /// Outcome message
    pub message: String,

    /// The user after the update
    pub user: UserProfile,
}

/// Response for a started password reset.
///
/// The raw token is surfaced for the delivery channel; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetIssued {
    /// Outcome message
    pub message: String,

    /// Raw single-use reset token
    pub token: String,
}

/// Bare outcome message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Outcome message
    pub message: String,
}

/// Response for a created organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationCreated {
    /// Outcome message
    pub message: String,

    /// The created organization
    pub organization: Organization,
}

/// Response for a created membership relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationCreated {
    /// Outcome message
    pub message: String,

    /// The created relation
    pub relation: Relation,
}

/// Response for a created subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCreated {
    /// Outcome message
    pub message: String,

    /// The created subscription
    pub subscription: Subscription,
}

/// Response for a renewed subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRenewed {
    /// Outcome message
    pub message: String,

    /// The subscription with its advanced renewal date
    pub subscription: Subscription,
}

/// Response describing a principal's current subscription.
///
/// Absence is a successful outcome: `{"subscribed": false}` with no
/// `subscription` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSubscription {
    /// Whether an active subscription exists
    pub subscribed: bool,

    /// The subscription, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_wire_names() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "jo@example.com",
            "password": "hunter2",
            "firstName": "Jo",
            "lastName": "Smith",
            "organizationName": "Acme Inc",
            "organizationRole": "owner"
        }))
        .unwrap();

        assert_eq!(request.first_name, "Jo");
        assert_eq!(request.organization_name.as_deref(), Some("Acme Inc"));
        assert_eq!(request.organization_role, Some(Role::Owner));
        assert!(request.organization_id.is_none());
    }

    #[test]
    fn test_register_request_debug_redacts_password() {
        let request = RegisterRequest {
            email: "jo@example.com".into(),
            password: "hunter2".into(),
            first_name: "Jo".into(),
            last_name: "Smith".into(),
            organization_id: None,
            organization_name: None,
            organization_role: None,
        };
        let output = format!("{:?}", request);

        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("hunter2"));
    }

    #[test]
    fn test_subscription_subject_resolution() {
        let base = CreateSubscriptionRequest {
            tier: Tier::Pro,
            term: Term::Monthly,
            user: None,
            organization: None,
            stripe_customer_id: None,
        };

        assert!(matches!(
            base.subject(),
            Err(GatewayError::MissingSubject)
        ));

        let user_id = Uuid::now_v7();
        let personal = CreateSubscriptionRequest {
            user: Some(user_id),
            ..base.clone()
        };
        assert_eq!(
            personal.subject().unwrap(),
            SubscriptionSubject::User(user_id)
        );

        let organization_id = Uuid::now_v7();
        let tenant = CreateSubscriptionRequest {
            organization: Some(organization_id),
            ..base.clone()
        };
        assert_eq!(
            tenant.subject().unwrap(),
            SubscriptionSubject::Organization(organization_id)
        );

        let both = CreateSubscriptionRequest {
            user: Some(user_id),
            organization: Some(organization_id),
            ..base
        };
        assert!(matches!(
            both.subject(),
            Err(GatewayError::ConflictingSubject)
        ));
    }

    #[test]
    fn test_absent_current_subscription_wire_shape() {
        let response = CurrentSubscription {
            subscribed: false,
            subscription: None,
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "subscribed": false }));
    }
}
