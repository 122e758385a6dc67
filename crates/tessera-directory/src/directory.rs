//! Directory service
//!
//! This module provides the `Directory` service, the write path for users,
//! organizations, and relations. It performs the cross-entity checks the
//! store deliberately does not: referenced entities must exist before a
//! relation is created, and the organization-creation write pair either
//! completes as a unit or is compensated.

use std::sync::Arc;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use crate::error::{DirectoryError, DirectoryResult};
use crate::membership::{OrganizationMember, Relation, UserOrganization};
use crate::organization::Organization;
use crate::roles::Role;
use crate::store::DirectoryStore;
use crate::user::{PasswordReset, User};

/// Input for creating a user.
///
/// The credential arrives pre-hashed; this crate never sees raw secrets.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address (must be unique)
    pub email: String,

    /// Opaque credential hash
    pub credential_hash: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,
}

/// Reference to an organization during registration.
///
/// Registration either joins an existing organization by ID or founds a new
/// one by name.
#[derive(Debug, Clone)]
pub enum OrganizationRef {
    /// Join an existing organization
    Id(Uuid),

    /// Found a new organization with this name
    Name(String),
}

/// Outcome of a registration that involved an organization.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The created user
    pub user: User,

    /// The organization joined or founded
    pub organization: Organization,

    /// The membership relation created
    pub relation: Relation,
}

/// Directory service over a [`DirectoryStore`].
///
/// All methods take `&self`; the service is cheap to clone and safe to share
/// across tasks.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tessera_directory::{Directory, MemoryDirectory, NewUser};
///
/// # async fn demo() -> Result<(), tessera_directory::DirectoryError> {
/// let directory = Directory::new(Arc::new(MemoryDirectory::new()));
/// let user = directory
///     .register(NewUser {
///         email: "jo@example.com".into(),
///         credential_hash: "$argon2id$...".into(),
///         first_name: "Jo".into(),
///         last_name: "Smith".into(),
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn DirectoryStore>,
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory").finish()
    }
}

impl Directory {
    /// Create a new directory service.
    ///
    /// # Arguments
    ///
    /// * `store` - The backing store
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Register a new user without any organization membership.
    ///
    /// # Arguments
    ///
    /// * `new_user` - The account details
    ///
    /// # Returns
    ///
    /// The created user, or [`DirectoryError::DuplicateEmail`] if the email
    /// is already registered.
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    pub async fn register(&self, new_user: NewUser) -> DirectoryResult<User> {
        debug!("Registering user");

        if self.store.user_by_email(&new_user.email).await?.is_some() {
            return Err(DirectoryError::DuplicateEmail);
        }

        let user = User::new(
            new_user.email,
            new_user.credential_hash,
            new_user.first_name,
            new_user.last_name,
        );
        Ok(self.store.insert_user(user).await?)
    }

    /// Register a new user together with an organization membership.
    ///
    /// The organization reference is validated before the user record is
    /// written, so a failed registration leaves nothing behind:
    /// - joining by ID fails with [`DirectoryError::OrganizationNotFound`]
    ///   if the organization does not exist;
    /// - founding by name fails with
    ///   [`DirectoryError::DuplicateOrganizationName`] if the name is taken.
    ///
    /// When founding a new organization the registering user becomes its
    /// owner; the membership role is the caller's choice in both paths.
    ///
    /// # Arguments
    ///
    /// * `new_user` - The account details
    /// * `organization` - Existing organization ID or new organization name
    /// * `role` - Role the user holds in the organization
    #[instrument(skip(self, new_user, organization), fields(email = %new_user.email))]
    pub async fn register_with_organization(
        &self,
        new_user: NewUser,
        organization: OrganizationRef,
        role: Role,
    ) -> DirectoryResult<Registration> {
        debug!("Registering user with organization");

        if self.store.user_by_email(&new_user.email).await?.is_some() {
            return Err(DirectoryError::DuplicateEmail);
        }

        // Validate the organization reference before any write
        let existing = match &organization {
            OrganizationRef::Id(id) => Some(
                self.store
                    .organization(*id)
                    .await?
                    .ok_or(DirectoryError::OrganizationNotFound)?,
            ),
            OrganizationRef::Name(name) => {
                if self.store.organization_by_name(name).await?.is_some() {
                    return Err(DirectoryError::DuplicateOrganizationName);
                }
                None
            }
        };

        let user = self
            .store
            .insert_user(User::new(
                new_user.email,
                new_user.credential_hash,
                new_user.first_name,
                new_user.last_name,
            ))
            .await?;

        let organization = match (existing, organization) {
            (Some(org), _) => {
                let mut joined = user.clone();
                joined.add_organization(org.id);
                self.store.update_user(joined).await?;
                org
            }
            (None, OrganizationRef::Name(name)) => {
                self.create_organization(&name, user.id).await?
            }
            // Unreachable: Id(..) always resolves to Some above
            (None, OrganizationRef::Id(_)) => return Err(DirectoryError::OrganizationNotFound),
        };

        let relation = self
            .store
            .insert_relation(Relation::new(user.id, organization.id, role))
            .await?;

        // Re-read so the returned record carries the membership append
        let user = self
            .store
            .user(user.id)
            .await?
            .ok_or(DirectoryError::UserNotFound)?;

        Ok(Registration {
            user,
            organization,
            relation,
        })
    }

    /// Fetch a user by ID.
    ///
    /// # Returns
    ///
    /// The user, or [`DirectoryError::UserNotFound`].
    pub async fn user(&self, id: Uuid) -> DirectoryResult<User> {
        self.store
            .user(id)
            .await?
            .ok_or(DirectoryError::UserNotFound)
    }

    /// Fetch a user by email, if one exists.
    ///
    /// Absence is a valid outcome here; login flows must not reveal whether
    /// an email is registered.
    pub async fn find_user_by_email(&self, email: &str) -> DirectoryResult<Option<User>> {
        Ok(self.store.user_by_email(email).await?)
    }

    /// Update a user's profile names.
    ///
    /// Absent fields keep their current value.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to update
    /// * `first_name` - New given name, if changing
    /// * `last_name` - New family name, if changing
    #[instrument(skip(self, first_name, last_name), fields(user_id = %user_id))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> DirectoryResult<User> {
        debug!("Updating user profile");

        let mut user = self.user(user_id).await?;
        if let Some(first_name) = first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            user.last_name = last_name;
        }
        user.updated_at = chrono::Utc::now();

        Ok(self.store.update_user(user).await?)
    }

    // ------------------------------------------------------------------
    // Organizations
    // ------------------------------------------------------------------

    /// Create an organization owned by an existing user.
    ///
    /// Two records change here: the organization is inserted and the owner's
    /// membership set gains the new ID. If the second write fails, the
    /// organization insert is compensated by deleting the row, so no
    /// organization exists whose owner does not know about it.
    ///
    /// The owner's [`Relation`] is not created here; membership roles are
    /// assigned by registration or [`Directory::add_member`].
    ///
    /// # Arguments
    ///
    /// * `name` - Organization name (must be unique)
    /// * `owner_id` - The owning user
    ///
    /// # Returns
    ///
    /// The created organization, [`DirectoryError::UserNotFound`] if the
    /// owner does not exist, or [`DirectoryError::DuplicateOrganizationName`]
    /// if the name is taken.
    #[instrument(skip(self, name), fields(owner_id = %owner_id))]
    pub async fn create_organization(
        &self,
        name: &str,
        owner_id: Uuid,
    ) -> DirectoryResult<Organization> {
        debug!("Creating organization {}", name);

        let mut owner = self
            .store
            .user(owner_id)
            .await?
            .ok_or(DirectoryError::UserNotFound)?;

        if self.store.organization_by_name(name).await?.is_some() {
            return Err(DirectoryError::DuplicateOrganizationName);
        }

        let organization = self
            .store
            .insert_organization(Organization::new(name, owner.id))
            .await?;

        owner.add_organization(organization.id);
        if let Err(err) = self.store.update_user(owner).await {
            warn!(
                organization_id = %organization.id,
                error = %err,
                "Owner membership append failed, compensating organization insert"
            );
            if let Err(cleanup) = self.store.remove_organization(organization.id).await {
                error!(
                    organization_id = %organization.id,
                    error = %cleanup,
                    "Compensation failed, organization row is orphaned"
                );
            }
            return Err(err.into());
        }

        Ok(organization)
    }

    /// Fetch an organization by ID.
    ///
    /// # Returns
    ///
    /// The organization, or [`DirectoryError::OrganizationNotFound`].
    pub async fn organization(&self, id: Uuid) -> DirectoryResult<Organization> {
        self.store
            .organization(id)
            .await?
            .ok_or(DirectoryError::OrganizationNotFound)
    }

    // ------------------------------------------------------------------
    // Relations
    // ------------------------------------------------------------------

    /// Add a user to an organization with a role.
    ///
    /// Both endpoints must exist; the store does not re-validate them. The
    /// user's denormalized membership set is kept in step with the relation.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user to add
    /// * `organization_id` - The organization to add them to
    /// * `role` - The role they hold
    ///
    /// # Returns
    ///
    /// The created relation, a `NotFound` error for a missing endpoint, or
    /// [`DirectoryError::RelationExists`] if the pair is already linked.
    #[instrument(skip(self), fields(user_id = %user_id, organization_id = %organization_id))]
    pub async fn add_member(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
        role: Role,
    ) -> DirectoryResult<Relation> {
        debug!("Adding member with role {}", role.as_str());

        let mut user = self
            .store
            .user(user_id)
            .await?
            .ok_or(DirectoryError::UserNotFound)?;
        if self.store.organization(organization_id).await?.is_none() {
            return Err(DirectoryError::OrganizationNotFound);
        }

        let relation = self
            .store
            .insert_relation(Relation::new(user_id, organization_id, role))
            .await?;

        user.add_organization(organization_id);
        self.store.update_user(user).await?;

        Ok(relation)
    }

    /// Fetch all relations for a user.
    ///
    /// Unknown users yield an empty set, not an error.
    pub async fn memberships_of(&self, user_id: Uuid) -> DirectoryResult<Vec<Relation>> {
        Ok(self.store.relations_for_user(user_id).await?)
    }

    /// Fetch all relations for an organization.
    ///
    /// Unknown organizations yield an empty set, not an error.
    pub async fn members_of(&self, organization_id: Uuid) -> DirectoryResult<Vec<Relation>> {
        Ok(self.store.relations_for_organization(organization_id).await?)
    }

    /// Fetch the relation for a specific (user, organization) pair.
    pub async fn find_membership(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> DirectoryResult<Option<Relation>> {
        Ok(self.store.find_relation(user_id, organization_id).await?)
    }

    /// List the members of an organization joined with their roles.
    ///
    /// Unknown organizations yield an empty roster, matching the relation
    /// queries this builds on.
    pub async fn roster_of(
        &self,
        organization_id: Uuid,
    ) -> DirectoryResult<Vec<OrganizationMember>> {
        let relations = self
            .store
            .relations_for_organization(organization_id)
            .await?;

        let mut members = Vec::with_capacity(relations.len());
        for relation in relations {
            // Relations only ever point at stored users; a dangling edge is
            // a storage-level inconsistency
            let user = self
                .store
                .user(relation.user_id)
                .await?
                .ok_or_else(|| DirectoryError::Store("relation points at missing user".into()))?;
            members.push(OrganizationMember {
                id: user.id,
                email: user.email,
                first_name: user.first_name,
                last_name: user.last_name,
                role: relation.role,
            });
        }

        Ok(members)
    }

    /// List the organizations a user belongs to joined with their roles.
    ///
    /// Unknown users yield an empty set, not an error.
    pub async fn organizations_of(
        &self,
        user_id: Uuid,
    ) -> DirectoryResult<Vec<UserOrganization>> {
        let relations = self.store.relations_for_user(user_id).await?;

        let mut memberships = Vec::with_capacity(relations.len());
        for relation in relations {
            let organization = self
                .store
                .organization(relation.organization_id)
                .await?
                .ok_or_else(|| {
                    DirectoryError::Store("relation points at missing organization".into())
                })?;
            memberships.push(UserOrganization {
                organization: organization.summary(),
                role: relation.role,
            });
        }

        Ok(memberships)
    }

    /// List the members of the organization the given user owns.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - The requesting user; must own an organization
    ///
    /// # Returns
    ///
    /// One entry per member with their role, or
    /// [`DirectoryError::NotAnOwner`] if the user owns no organization.
    #[instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn roster_for_owner(
        &self,
        owner_id: Uuid,
    ) -> DirectoryResult<Vec<OrganizationMember>> {
        debug!("Listing roster for owner");

        let owner = self.user(owner_id).await?;
        let organization = self
            .store
            .organization_owned_by(owner.id)
            .await?
            .ok_or(DirectoryError::NotAnOwner)?;

        self.roster_of(organization.id).await
    }

    // ------------------------------------------------------------------
    // Password reset
    // ------------------------------------------------------------------

    /// Start a password reset for the given email.
    ///
    /// A fresh reset token is generated and its digest stored with a
    /// one-hour expiry; any earlier token for the user stops working. The
    /// raw token is returned exactly once for delivery to the user and is
    /// never persisted.
    ///
    /// # Arguments
    ///
    /// * `email` - The account's email address
    ///
    /// # Returns
    ///
    /// The raw reset token, or [`DirectoryError::UserNotFound`].
    #[instrument(skip(self, email))]
    pub async fn begin_password_reset(&self, email: &str) -> DirectoryResult<String> {
        debug!("Starting password reset");

        let mut user = self
            .store
            .user_by_email(email)
            .await?
            .ok_or(DirectoryError::UserNotFound)?;

        let token = reset_token();
        user.password_reset = Some(PasswordReset {
            token_digest: digest_token(&token),
            expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        });
        user.updated_at = chrono::Utc::now();
        self.store.update_user(user).await?;

        Ok(token)
    }

    /// Complete a password reset.
    ///
    /// The token is single-use: completing the reset clears the stored
    /// digest. Unknown and expired tokens fail the same way.
    ///
    /// # Arguments
    ///
    /// * `token` - The raw token from [`Directory::begin_password_reset`]
    /// * `new_credential_hash` - Replacement credential hash
    #[instrument(skip(self, token, new_credential_hash))]
    pub async fn complete_password_reset(
        &self,
        token: &str,
        new_credential_hash: &str,
    ) -> DirectoryResult<()> {
        debug!("Completing password reset");

        let mut user = self
            .store
            .user_by_reset_digest(&digest_token(token))
            .await?
            .ok_or(DirectoryError::InvalidResetToken)?;

        let reset = user
            .password_reset
            .as_ref()
            .ok_or(DirectoryError::InvalidResetToken)?;
        if reset.is_expired() {
            return Err(DirectoryError::InvalidResetToken);
        }

        user.credential_hash = new_credential_hash.to_string();
        user.password_reset = None;
        user.updated_at = chrono::Utc::now();
        self.store.update_user(user).await?;

        Ok(())
    }
}

/// Generate a random password-reset token.
fn reset_token() -> String {
    use rand::Rng;
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(40)
        .map(char::from)
        .collect()
}

/// Digest a reset token for at-rest storage.
pub fn digest_token(token: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let hash = hasher.finalize();
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, hash)
}

// ============================================================================
// Tests
// ============================================================================
