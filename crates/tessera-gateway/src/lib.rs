//! # Tessera Gateway
//!
//! This crate provides the operation surface of the Tessera platform: one
//! service combining the directory, auth, and billing crates behind plain
//! request and response types a transport can bind routes to.
//!
//! ## Overview
//!
//! The tessera-gateway crate handles:
//! - **Accounts**: Registration, login, profile reads and updates
//! - **Password resets**: Token issue and redemption
//! - **Organizations**: Creation, membership, and roster queries
//! - **Subscriptions**: Creation, renewal, and entitlement lookups
//! - **Access control**: Bearer-token identity and shared-organization
//!   authorization on every protected operation
//!
//! Errors render to a uniform wire envelope ([`ErrorBody`]) carrying an HTTP
//! status, a stable machine-readable code, and a message.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tessera_gateway::{CreateSubscriptionRequest, Gateway, LoginRequest, RegisterRequest};
//!
//! # async fn demo() -> Result<(), tessera_gateway::GatewayError> {
//! let gateway = Gateway::in_memory("signing-secret");
//!
//! let registration = gateway
//!     .register(RegisterRequest {
//!         email: "founder@acme.example".into(),
//!         password: "hunter2".into(),
//!         first_name: "Ada".into(),
//!         last_name: "Founder".into(),
//!         organization_id: None,
//!         organization_name: Some("Acme Inc".into()),
//!         organization_role: Some(tessera_directory::Role::Owner),
//!     })
//!     .await?;
//!
//! let session = gateway
//!     .login(LoginRequest {
//!         email: "founder@acme.example".into(),
//!         password: "hunter2".into(),
//!     })
//!     .await?;
//!
//! let subscription = gateway
//!     .create_subscription(CreateSubscriptionRequest {
//!         tier: tessera_billing::Tier::Pro,
//!         term: tessera_billing::Term::Annually,
//!         user: Some(registration.user.id),
//!         organization: None,
//!         stripe_customer_id: None,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate composes:
//! - `tessera-directory`: Users, organizations, and relations
//! - `tessera-auth`: Token identity and authorization decisions
//! - `tessera-billing`: Subscription entitlements

pub mod error;
pub mod gateway;
pub mod types;

// Re-export main types for convenience
pub use error::{ErrorBody, GatewayError, GatewayResult};
pub use gateway::{Gateway, GatewayConfig};
pub use types::{
    AddRelationRequest, CreateOrganizationRequest, CreateSubscriptionRequest, CurrentSubscription,
    ForgotPasswordRequest, LoginRequest, MessageResponse, OrganizationCreated,
    PasswordResetIssued, RegisterRequest, RegisterResponse, RelationCreated, ResetPasswordRequest,
    SubscriptionCreated, SubscriptionRenewed, TokenResponse, UpdateUserRequest, UserUpdated,
};
