//! Gateway service
//!
//! This module provides the `Gateway` service, the operation surface a
//! transport binds routes to. Every operation takes plain request types and
//! returns plain response types; token checks and authorization decisions
//! happen here, so the transport stays a thin mapping layer.
//!
//! Operations that require a caller identity take the raw `Authorization`
//! header value and resolve it themselves.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use uuid::Uuid;

use tessera_auth::{
    authorize, bearer_token, AuthError, CredentialScheme, Sha256Credentials, TokenConfig, Tokens,
};
use tessera_billing::{
    MemberSubscription, MemorySubscriptions, NewSubscription, SubscriptionStore, Subscriptions,
};
use tessera_directory::{
    Directory, DirectoryStore, MemoryDirectory, NewUser, OrganizationMember, OrganizationRef,
    UserOrganization, UserProfile,
};

use crate::error::{GatewayError, GatewayResult};
use crate::types::{
    AddRelationRequest, CreateOrganizationRequest, CreateSubscriptionRequest, CurrentSubscription,
    ForgotPasswordRequest, LoginRequest, MessageResponse, OrganizationCreated,
    PasswordResetIssued, RegisterRequest, RegisterResponse, RelationCreated, ResetPasswordRequest,
    SubscriptionCreated, SubscriptionRenewed, TokenResponse, UpdateUserRequest, UserUpdated,
};

/// Feature switches for a gateway deployment.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Whether organization operations are available.
    ///
    /// When off, registration ignores its organization fields and the
    /// organization and relation operations report an absent surface.
    pub organizations_enabled: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            organizations_enabled: true,
        }
    }
}

/// The operation surface over the directory, auth, and billing crates.
///
/// Cheap to clone; all state lives behind the injected stores.
///
/// # Examples
///
/// ```
/// use tessera_gateway::{Gateway, LoginRequest, RegisterRequest};
///
/// # async fn demo() -> Result<(), tessera_gateway::GatewayError> {
/// let gateway = Gateway::in_memory("signing-secret");
///
/// gateway
///     .register(RegisterRequest {
///         email: "founder@acme.example".into(),
///         password: "hunter2".into(),
///         first_name: "Ada".into(),
///         last_name: "Founder".into(),
///         organization_id: None,
///         organization_name: Some("Acme Inc".into()),
///         organization_role: Some(tessera_directory::Role::Owner),
///     })
///     .await?;
///
/// let session = gateway
///     .login(LoginRequest {
///         email: "founder@acme.example".into(),
///         password: "hunter2".into(),
///     })
///     .await?;
/// assert!(!session.token.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Gateway {
    directory: Directory,
    subscriptions: Subscriptions,
    tokens: Tokens,
    credentials: Arc<dyn CredentialScheme>,
    store: Arc<dyn DirectoryStore>,
    config: GatewayConfig,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Creates a new gateway over the given stores.
    ///
    /// # Arguments
    ///
    /// * `directory_store` - Backing store for users, organizations, relations
    /// * `subscription_store` - Backing store for subscriptions
    /// * `token_config` - Signing secret and token lifetime
    /// * `credentials` - Credential hashing scheme
    /// * `config` - Deployment feature switches
    pub fn new(
        directory_store: Arc<dyn DirectoryStore>,
        subscription_store: Arc<dyn SubscriptionStore>,
        token_config: TokenConfig,
        credentials: Arc<dyn CredentialScheme>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            directory: Directory::new(directory_store.clone()),
            subscriptions: Subscriptions::new(subscription_store, directory_store.clone()),
            tokens: Tokens::new(token_config),
            credentials,
            store: directory_store,
            config,
        }
    }

    /// Build a gateway over in-memory stores with SHA-256 credentials.
    ///
    /// Suited to tests and demos; deployments inject their own stores and a
    /// KDF-backed credential scheme through [`Gateway::new`].
    pub fn in_memory(secret: impl Into<String>) -> Self {
        Self::new(
            Arc::new(MemoryDirectory::new()),
            Arc::new(MemorySubscriptions::new()),
            TokenConfig::new(secret),
            Arc::new(Sha256Credentials),
            GatewayConfig::default(),
        )
    }

    /// Get the deployment configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Principals
    // ------------------------------------------------------------------

    /// Resolve the principal behind an `Authorization` header value.
    fn principal(&self, authorization: Option<&str>) -> GatewayResult<Uuid> {
        let token = bearer_token(authorization).ok_or(AuthError::MissingToken)?;
        let claims = self.tokens.verify(token)?;
        claims
            .principal_id()
            .ok_or_else(|| AuthError::Malformed("subject is not a user id".into()).into())
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// Register a new user, optionally joining or founding an organization.
    ///
    /// With organization support enabled the request must name exactly one
    /// of an existing organization ID or a new organization name, plus the
    /// role to hold; when both are given the ID wins. With support disabled
    /// the organization fields are ignored.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> GatewayResult<RegisterResponse> {
        debug!("Registering user");

        let new_user = NewUser {
            email: request.email,
            credential_hash: self.credentials.hash(&request.password),
            first_name: request.first_name,
            last_name: request.last_name,
        };

        if !self.config.organizations_enabled {
            let user = self.directory.register(new_user).await?;
            return Ok(RegisterResponse {
                message: "User created successfully".to_string(),
                user: user.profile(),
                organization: None,
                relation: None,
            });
        }

        let organization = match (request.organization_id, request.organization_name) {
            (Some(id), _) => OrganizationRef::Id(id),
            (None, Some(name)) => OrganizationRef::Name(name),
            (None, None) => return Err(GatewayError::MissingOrganizationRef),
        };
        let role = request
            .organization_role
            .ok_or(GatewayError::MissingRole)?;

        let registration = self
            .directory
            .register_with_organization(new_user, organization, role)
            .await?;

        Ok(RegisterResponse {
            message: "User created successfully".to_string(),
            user: registration.user.profile(),
            organization: Some(registration.organization),
            relation: Some(registration.relation),
        })
    }

    /// Authenticate an email/password pair and mint an access token.
    ///
    /// Unknown emails and wrong passwords fail identically, so responses
    /// reveal nothing about which emails are registered.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> GatewayResult<TokenResponse> {
        debug!("Logging in");

        let user = self
            .directory
            .find_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .credentials
            .verify(&request.password, &user.credential_hash)
        {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(user.id)?;
        Ok(TokenResponse { token })
    }

    /// Fetch a user's profile.
    ///
    /// The caller must be the user themselves or hold an elevated role in
    /// an organization the target belongs to.
    #[instrument(skip(self, authorization), fields(user_id = %user_id))]
    pub async fn get_user(
        &self,
        authorization: Option<&str>,
        user_id: Uuid,
    ) -> GatewayResult<UserProfile> {
        let principal = self.principal(authorization)?;
        authorize(self.store.as_ref(), principal, user_id).await?;

        let user = self.directory.user(user_id).await?;
        Ok(user.profile())
    }

    /// Update a user's name fields.
    ///
    /// Access follows the same rule as [`Gateway::get_user`].
    #[instrument(skip(self, authorization, request), fields(user_id = %user_id))]
    pub async fn update_user(
        &self,
        authorization: Option<&str>,
        user_id: Uuid,
        request: UpdateUserRequest,
    ) -> GatewayResult<UserUpdated> {
        let principal = self.principal(authorization)?;
        authorize(self.store.as_ref(), principal, user_id).await?;

        let user = self
            .directory
            .update_profile(user_id, request.first_name, request.last_name)
            .await?;

        Ok(UserUpdated {
            message: "User updated successfully".to_string(),
            user: user.profile(),
        })
    }

    /// List the members of the organization the caller owns.
    #[instrument(skip(self, authorization))]
    pub async fn owner_roster(
        &self,
        authorization: Option<&str>,
    ) -> GatewayResult<Vec<OrganizationMember>> {
        let principal = self.principal(authorization)?;
        Ok(self.directory.roster_for_owner(principal).await?)
    }

    /// Start a password reset for the given email.
    ///
    /// The raw token is surfaced once for the delivery channel and never
    /// stored.
    pub async fn forgot_password(
        &self,
        request: ForgotPasswordRequest,
    ) -> GatewayResult<PasswordResetIssued> {
        let token = self.directory.begin_password_reset(&request.email).await?;
        Ok(PasswordResetIssued {
            message: "Password reset email sent. Please check your email.".to_string(),
            token,
        })
    }

    /// Complete a password reset with a token from the delivery channel.
    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> GatewayResult<MessageResponse> {
        let credential_hash = self.credentials.hash(&request.password);
        self.directory
            .complete_password_reset(&request.token, &credential_hash)
            .await?;

        Ok(MessageResponse {
            message: "Password reset successful".to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Organizations
    // ------------------------------------------------------------------

    /// Create an organization owned by the named user.
    ///
    /// Requires a valid token. Ownership comes from the request body, so a
    /// caller can found organizations on behalf of other users.
    #[instrument(skip(self, authorization, request), fields(name = %request.name))]
    pub async fn create_organization(
        &self,
        authorization: Option<&str>,
        request: CreateOrganizationRequest,
    ) -> GatewayResult<OrganizationCreated> {
        if !self.config.organizations_enabled {
            return Err(GatewayError::OrganizationsDisabled);
        }
        self.principal(authorization)?;

        let organization = self
            .directory
            .create_organization(&request.name, request.owner_user_id)
            .await?;

        Ok(OrganizationCreated {
            message: "Organization created successfully".to_string(),
            organization,
        })
    }

    /// Add a user to an organization with a role.
    #[instrument(skip(self, request), fields(user_id = %request.user, organization_id = %request.organization))]
    pub async fn add_relation(
        &self,
        request: AddRelationRequest,
    ) -> GatewayResult<RelationCreated> {
        if !self.config.organizations_enabled {
            return Err(GatewayError::OrganizationsDisabled);
        }

        let relation = self
            .directory
            .add_member(request.user, request.organization, request.role)
            .await?;

        Ok(RelationCreated {
            message: "User added to the organization".to_string(),
            relation,
        })
    }

    /// List an organization's members with their roles.
    pub async fn organization_members(
        &self,
        organization_id: Uuid,
    ) -> GatewayResult<Vec<OrganizationMember>> {
        if !self.config.organizations_enabled {
            return Err(GatewayError::OrganizationsDisabled);
        }
        Ok(self.directory.roster_of(organization_id).await?)
    }

    /// List the organizations a user belongs to with their roles.
    pub async fn user_organizations(
        &self,
        user_id: Uuid,
    ) -> GatewayResult<Vec<UserOrganization>> {
        if !self.config.organizations_enabled {
            return Err(GatewayError::OrganizationsDisabled);
        }
        Ok(self.directory.organizations_of(user_id).await?)
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Create a subscription for exactly one subject.
    #[instrument(skip(self, request), fields(tier = request.tier.as_str(), term = request.term.as_str()))]
    pub async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> GatewayResult<SubscriptionCreated> {
        let subject = request.subject()?;
        let subscription = self
            .subscriptions
            .create(NewSubscription {
                tier: request.tier,
                term: request.term,
                subject,
                stripe_customer_id: request.stripe_customer_id,
            })
            .await?;

        Ok(SubscriptionCreated {
            message: "Subscription created successfully".to_string(),
            subscription,
        })
    }

    /// Advance a subscription's renewal date.
    ///
    /// Without an explicit date the new anchor is one term from now.
    #[instrument(skip(self), fields(subscription_id = %subscription_id))]
    pub async fn renew_subscription(
        &self,
        subscription_id: Uuid,
        renewal_date: Option<DateTime<Utc>>,
    ) -> GatewayResult<SubscriptionRenewed> {
        let subscription = self
            .subscriptions
            .renew(subscription_id, renewal_date)
            .await?;

        Ok(SubscriptionRenewed {
            message: "Subscription renewed successfully".to_string(),
            subscription,
        })
    }

    /// Fetch the caller's personal subscription, if any.
    ///
    /// Having no subscription is a successful outcome, not an error.
    pub async fn current_subscription(
        &self,
        authorization: Option<&str>,
    ) -> GatewayResult<CurrentSubscription> {
        let principal = self.principal(authorization)?;
        let subscription = self.subscriptions.current_for_user(principal).await?;

        Ok(CurrentSubscription {
            subscribed: subscription.is_some(),
            subscription,
        })
    }

    /// List an organization's members with their personal subscriptions.
    ///
    /// The caller must hold a relation to the organization; members without
    /// a subscription appear with a null entry.
    #[instrument(skip(self, authorization), fields(organization_id = %organization_id))]
    pub async fn organization_subscriptions(
        &self,
        authorization: Option<&str>,
        organization_id: Uuid,
    ) -> GatewayResult<Vec<MemberSubscription>> {
        let principal = self.principal(authorization)?;
        Ok(self
            .subscriptions
            .subscribed_members(principal, organization_id)
            .await?)
    }
}

// ============================================================================
// Tests
// ============================================================================
