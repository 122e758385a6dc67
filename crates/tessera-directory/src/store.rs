//! Directory persistence
//!
//! This module provides the storage abstraction for users, organizations,
//! and relations, plus an in-memory implementation.
//!
//! Every store call is a single-entity operation that either fully applies
//! or fully rejects; uniqueness checks happen inside the same critical
//! section as the write. Multi-entity sequences (and their compensation)
//! belong to the [`Directory`](crate::Directory) service, not the store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::membership::Relation;
use crate::organization::Organization;
use crate::user::User;

/// Directory store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A user with this email already exists
    #[error("User already exists")]
    DuplicateEmail,

    /// An organization with this name already exists
    #[error("Organization already exists")]
    DuplicateOrganizationName,

    /// A relation for this (user, organization) pair already exists
    #[error("User is already a member of this organization")]
    DuplicateRelation,

    /// Update targeted a user that does not exist
    #[error("User not found")]
    MissingUser,

    /// Storage backend failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage abstraction for the directory.
///
/// Query methods carry no ordering guarantees; callers must not assume
/// insertion order on the returned collections.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Rejects the insert with [`StoreError::DuplicateEmail`] if the email
    /// is already taken.
    async fn insert_user(&self, user: User) -> StoreResult<User>;

    /// Fetch a user by ID.
    async fn user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Fetch a user by email.
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Fetch the user holding the given password-reset token digest.
    async fn user_by_reset_digest(&self, digest: &str) -> StoreResult<Option<User>>;

    /// Replace a stored user record.
    ///
    /// The whole record is swapped in one step; fails with
    /// [`StoreError::MissingUser`] if the user does not exist.
    async fn update_user(&self, user: User) -> StoreResult<User>;

    /// Fetch all users whose membership set contains the organization.
    async fn users_in_organization(&self, organization_id: Uuid) -> StoreResult<Vec<User>>;

    /// Insert a new organization.
    ///
    /// Rejects the insert with [`StoreError::DuplicateOrganizationName`] if
    /// the name is already taken.
    async fn insert_organization(&self, organization: Organization) -> StoreResult<Organization>;

    /// Fetch an organization by ID.
    async fn organization(&self, id: Uuid) -> StoreResult<Option<Organization>>;

    /// Fetch an organization by name.
    async fn organization_by_name(&self, name: &str) -> StoreResult<Option<Organization>>;

    /// Fetch an organization owned by the given user, if any.
    ///
    /// If the user owns several organizations, which one is returned is
    /// unspecified.
    async fn organization_owned_by(&self, owner_id: Uuid) -> StoreResult<Option<Organization>>;

    /// Remove an organization.
    ///
    /// Removing an absent organization is a no-op. This exists solely as the
    /// compensation step for organization creation.
    async fn remove_organization(&self, id: Uuid) -> StoreResult<()>;

    /// Insert a new relation.
    ///
    /// Rejects the insert with [`StoreError::DuplicateRelation`] if a
    /// relation for the (user, organization) pair already exists.
    async fn insert_relation(&self, relation: Relation) -> StoreResult<Relation>;

    /// Fetch all relations for a user.
    async fn relations_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Relation>>;

    /// Fetch all relations for an organization.
    async fn relations_for_organization(&self, organization_id: Uuid) -> StoreResult<Vec<Relation>>;

    /// Fetch the relation for a specific (user, organization) pair.
    async fn find_relation(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> StoreResult<Option<Relation>>;
}

/// Shared directory state guarded by one lock.
#[derive(Debug, Default)]
struct DirectoryState {
    users: HashMap<Uuid, User>,
    organizations: HashMap<Uuid, Organization>,
    relations: HashMap<(Uuid, Uuid), Relation>,
}

/// In-memory directory store.
///
/// This is suitable for single-process deployments and testing. The relation
/// map is keyed by (user, organization), so pair lookups never scan.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl MemoryDirectory {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectory {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn user_by_reset_digest(&self, digest: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| {
                u.password_reset
                    .as_ref()
                    .map(|r| r.token_digest == digest)
                    .unwrap_or(false)
            })
            .cloned())
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user.id) {
            return Err(StoreError::MissingUser);
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn users_in_organization(&self, organization_id: Uuid) -> StoreResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .filter(|u| u.organizations.contains(&organization_id))
            .cloned()
            .collect())
    }

    async fn insert_organization(&self, organization: Organization) -> StoreResult<Organization> {
        let mut state = self.state.write().await;
        if state
            .organizations
            .values()
            .any(|o| o.name == organization.name)
        {
            return Err(StoreError::DuplicateOrganizationName);
        }
        state.organizations.insert(organization.id, organization.clone());
        Ok(organization)
    }

    async fn organization(&self, id: Uuid) -> StoreResult<Option<Organization>> {
        let state = self.state.read().await;
        Ok(state.organizations.get(&id).cloned())
    }

    async fn organization_by_name(&self, name: &str) -> StoreResult<Option<Organization>> {
        let state = self.state.read().await;
        Ok(state
            .organizations
            .values()
            .find(|o| o.name == name)
            .cloned())
    }

    async fn organization_owned_by(&self, owner_id: Uuid) -> StoreResult<Option<Organization>> {
        let state = self.state.read().await;
        Ok(state
            .organizations
            .values()
            .find(|o| o.owner_id == owner_id)
            .cloned())
    }

    async fn remove_organization(&self, id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.organizations.remove(&id);
        Ok(())
    }

    async fn insert_relation(&self, relation: Relation) -> StoreResult<Relation> {
        let mut state = self.state.write().await;
        let key = (relation.user_id, relation.organization_id);
        if state.relations.contains_key(&key) {
            return Err(StoreError::DuplicateRelation);
        }
        state.relations.insert(key, relation.clone());
        Ok(relation)
    }

    async fn relations_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Relation>> {
        let state = self.state.read().await;
        Ok(state
            .relations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn relations_for_organization(&self, organization_id: Uuid) -> StoreResult<Vec<Relation>> {
        let state = self.state.read().await;
        Ok(state
            .relations
            .values()
            .filter(|r| r.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn find_relation(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> StoreResult<Option<Relation>> {
        let state = self.state.read().await;
        Ok(state.relations.get(&(user_id, organization_id)).cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    #[tokio::test]
    async fn test_insert_user_rejects_duplicate_email() {
        let store = MemoryDirectory::new();

        let first = User::new("jo@example.com", "hash", "Jo", "Smith");
        store.insert_user(first).await.unwrap();

        let second = User::new("jo@example.com", "hash", "Joanna", "Smith");
        let err = store.insert_user(second).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_user_lookup_by_email() {
        let store = MemoryDirectory::new();
        let user = store
            .insert_user(User::new("jo@example.com", "hash", "Jo", "Smith"))
            .await
            .unwrap();

        let found = store.user_by_email("jo@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));

        let missing = store.user_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_user_requires_existing_record() {
        let store = MemoryDirectory::new();
        let user = User::new("jo@example.com", "hash", "Jo", "Smith");

        let err = store.update_user(user.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingUser));

        store.insert_user(user.clone()).await.unwrap();
        let mut updated = user;
        updated.first_name = "Joanna".to_string();
        let stored = store.update_user(updated).await.unwrap();
        assert_eq!(stored.first_name, "Joanna");
    }

    #[tokio::test]
    async fn test_insert_organization_rejects_duplicate_name() {
        let store = MemoryDirectory::new();
        let owner_id = Uuid::now_v7();

        store
            .insert_organization(Organization::new("Acme Inc", owner_id))
            .await
            .unwrap();

        let err = store
            .insert_organization(Organization::new("Acme Inc", Uuid::now_v7()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateOrganizationName));
    }

    #[tokio::test]
    async fn test_remove_organization_is_idempotent() {
        let store = MemoryDirectory::new();
        let org = store
            .insert_organization(Organization::new("Acme Inc", Uuid::now_v7()))
            .await
            .unwrap();

        store.remove_organization(org.id).await.unwrap();
        assert!(store.organization(org.id).await.unwrap().is_none());

        // Second removal is a no-op
        store.remove_organization(org.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_relation_rejects_duplicate_pair() {
        let store = MemoryDirectory::new();
        let user_id = Uuid::now_v7();
        let org_id = Uuid::now_v7();

        store
            .insert_relation(Relation::new(user_id, org_id, Role::User))
            .await
            .unwrap();

        let err = store
            .insert_relation(Relation::new(user_id, org_id, Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateRelation));

        // The original relation is untouched
        let relation = store.find_relation(user_id, org_id).await.unwrap().unwrap();
        assert_eq!(relation.role, Role::User);
    }

    #[tokio::test]
    async fn test_relation_queries_by_user_and_organization() {
        let store = MemoryDirectory::new();
        let user_a = Uuid::now_v7();
        let user_b = Uuid::now_v7();
        let org_x = Uuid::now_v7();
        let org_y = Uuid::now_v7();

        store
            .insert_relation(Relation::new(user_a, org_x, Role::Owner))
            .await
            .unwrap();
        store
            .insert_relation(Relation::new(user_a, org_y, Role::User))
            .await
            .unwrap();
        store
            .insert_relation(Relation::new(user_b, org_x, Role::Admin))
            .await
            .unwrap();

        let for_user = store.relations_for_user(user_a).await.unwrap();
        assert_eq!(for_user.len(), 2);

        let for_org = store.relations_for_organization(org_x).await.unwrap();
        assert_eq!(for_org.len(), 2);

        assert!(store.find_relation(user_b, org_y).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_users_in_organization_uses_membership_set() {
        let store = MemoryDirectory::new();
        let org_id = Uuid::now_v7();

        let mut member = User::new("member@example.com", "hash", "Mia", "Member");
        member.add_organization(org_id);
        store.insert_user(member).await.unwrap();

        store
            .insert_user(User::new("other@example.com", "hash", "Olly", "Other"))
            .await
            .unwrap();

        let users = store.users_in_organization(org_id).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "member@example.com");
    }

    #[tokio::test]
    async fn test_user_by_reset_digest() {
        let store = MemoryDirectory::new();
        let mut user = User::new("jo@example.com", "hash", "Jo", "Smith");
        user.password_reset = Some(crate::user::PasswordReset {
            token_digest: "digest-value".to_string(),
            expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        });
        store.insert_user(user.clone()).await.unwrap();

        let found = store.user_by_reset_digest("digest-value").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));

        assert!(store
            .user_by_reset_digest("other-digest")
            .await
            .unwrap()
            .is_none());
    }
}
