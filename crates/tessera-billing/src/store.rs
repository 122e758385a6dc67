//! Subscription persistence
//!
//! Storage abstraction for subscription records plus an in-memory
//! implementation. Singularity per subject is not enforced at insert;
//! the `find_for_*` queries return at most one match and leave which one
//! unspecified when several exist.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::subscription::Subscription;

/// Subscription store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Update targeted a subscription that does not exist
    #[error("Subscription not found")]
    MissingSubscription,

    /// Storage backend failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage abstraction for subscriptions.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Insert a new subscription.
    async fn insert(&self, subscription: Subscription) -> StoreResult<Subscription>;

    /// Fetch a subscription by ID.
    async fn get(&self, id: Uuid) -> StoreResult<Option<Subscription>>;

    /// Replace a stored subscription record.
    ///
    /// The whole record is swapped in one step; fails with
    /// [`StoreError::MissingSubscription`] if the subscription does not
    /// exist.
    async fn update(&self, subscription: Subscription) -> StoreResult<Subscription>;

    /// Fetch the subscription held by a user, if any.
    async fn find_for_user(&self, user_id: Uuid) -> StoreResult<Option<Subscription>>;

    /// Fetch the subscription held by an organization, if any.
    async fn find_for_organization(
        &self,
        organization_id: Uuid,
    ) -> StoreResult<Option<Subscription>>;
}

/// In-memory subscription store.
///
/// Suitable for single-process deployments and testing.
#[derive(Debug, Default)]
pub struct MemorySubscriptions {
    state: Arc<RwLock<HashMap<Uuid, Subscription>>>,
}

impl MemorySubscriptions {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptions {
    async fn insert(&self, subscription: Subscription) -> StoreResult<Subscription> {
        let mut state = self.state.write().await;
        state.insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Subscription>> {
        let state = self.state.read().await;
        Ok(state.get(&id).cloned())
    }

    async fn update(&self, subscription: Subscription) -> StoreResult<Subscription> {
        let mut state = self.state.write().await;
        if !state.contains_key(&subscription.id) {
            return Err(StoreError::MissingSubscription);
        }
        state.insert(subscription.id, subscription.clone());
        Ok(subscription)
    }

    async fn find_for_user(&self, user_id: Uuid) -> StoreResult<Option<Subscription>> {
        let state = self.state.read().await;
        Ok(state
            .values()
            .find(|s| s.subject.user_id() == Some(user_id))
            .cloned())
    }

    async fn find_for_organization(
        &self,
        organization_id: Uuid,
    ) -> StoreResult<Option<Subscription>> {
        let state = self.state.read().await;
        Ok(state
            .values()
            .find(|s| s.subject.organization_id() == Some(organization_id))
            .cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Term, Tier};
    use crate::subject::SubscriptionSubject;

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemorySubscriptions::new();
        let subscription = Subscription::new(
            Tier::Pro,
            Term::Monthly,
            SubscriptionSubject::User(Uuid::now_v7()),
        );

        let stored = store.insert(subscription.clone()).await.unwrap();
        assert_eq!(stored.id, subscription.id);

        let fetched = store.get(subscription.id).await.unwrap();
        assert_eq!(fetched.map(|s| s.id), Some(subscription.id));

        assert!(store.get(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_requires_existing_record() {
        let store = MemorySubscriptions::new();
        let subscription = Subscription::new(
            Tier::Basic,
            Term::Annually,
            SubscriptionSubject::Organization(Uuid::now_v7()),
        );

        let err = store.update(subscription.clone()).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingSubscription));

        store.insert(subscription.clone()).await.unwrap();
        let mut renewed = subscription;
        renewed.update_renewal(None);
        store.update(renewed).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_for_user_matches_user_subjects_only() {
        let store = MemorySubscriptions::new();
        let user_id = Uuid::now_v7();
        let org_id = Uuid::now_v7();

        store
            .insert(Subscription::new(
                Tier::Pro,
                Term::Monthly,
                SubscriptionSubject::User(user_id),
            ))
            .await
            .unwrap();
        store
            .insert(Subscription::new(
                Tier::Advanced,
                Term::Annually,
                SubscriptionSubject::Organization(org_id),
            ))
            .await
            .unwrap();

        let for_user = store.find_for_user(user_id).await.unwrap().unwrap();
        assert_eq!(for_user.tier, Tier::Pro);

        let for_org = store.find_for_organization(org_id).await.unwrap().unwrap();
        assert_eq!(for_org.tier, Tier::Advanced);

        // An organization id never matches a user-subject subscription
        assert!(store.find_for_user(org_id).await.unwrap().is_none());
    }
}
