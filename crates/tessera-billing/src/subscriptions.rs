//! Subscription lifecycle operations
//!
//! This module provides the `Subscriptions` service: creating, renewing,
//! and querying subscriptions. The subject of every new subscription must
//! resolve to an existing user or organization in the directory; beyond
//! that, the directory and the subscription store stay independent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use tessera_directory::{DirectoryStore, UserProfile};

use crate::error::{BillingError, BillingResult};
use crate::plan::{Term, Tier};
use crate::store::SubscriptionStore;
use crate::subject::SubscriptionSubject;
use crate::subscription::Subscription;

/// Input for creating a subscription.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    /// Granted tier
    pub tier: Tier,

    /// Billing term
    pub term: Term,

    /// Who holds the subscription
    pub subject: SubscriptionSubject,

    /// Payment-processor customer reference, when one exists
    pub stripe_customer_id: Option<String>,
}

/// A member of an organization together with their personal subscription.
///
/// The profile fields sit at the top level of the wire form, with the
/// subscription nested under `subscription` (null when the member has
/// none).
#[derive(Debug, Clone, Serialize)]
pub struct MemberSubscription {
    /// The member's profile
    #[serde(flatten)]
    pub member: UserProfile,

    /// The member's subscription, if any
    pub subscription: Option<Subscription>,
}

/// Subscription service over a [`SubscriptionStore`] and the directory.
///
/// All methods take `&self`; the service is cheap to clone and safe to
/// share across tasks.
#[derive(Clone)]
pub struct Subscriptions {
    store: Arc<dyn SubscriptionStore>,
    directory: Arc<dyn DirectoryStore>,
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions").finish()
    }
}

impl Subscriptions {
    /// Create a new subscription service.
    ///
    /// # Arguments
    ///
    /// * `store` - The backing subscription store
    /// * `directory` - Directory store used for subject existence checks
    pub fn new(store: Arc<dyn SubscriptionStore>, directory: Arc<dyn DirectoryStore>) -> Self {
        Self { store, directory }
    }

    /// Create a subscription.
    ///
    /// The subject must resolve to an existing user or organization;
    /// `next_renewal` is computed from the creation instant and the term.
    ///
    /// # Arguments
    ///
    /// * `new` - Tier, term, subject, and optional billing reference
    ///
    /// # Returns
    ///
    /// The created subscription, or a not-found error for a dangling
    /// subject
    #[instrument(skip(self, new), fields(tier = new.tier.as_str(), term = new.term.as_str()))]
    pub async fn create(&self, new: NewSubscription) -> BillingResult<Subscription> {
        debug!("Creating subscription");

        match new.subject {
            SubscriptionSubject::User(id) => {
                self.directory
                    .user(id)
                    .await?
                    .ok_or(BillingError::UserNotFound)?;
            }
            SubscriptionSubject::Organization(id) => {
                self.directory
                    .organization(id)
                    .await?
                    .ok_or(BillingError::OrganizationNotFound)?;
            }
        }

        let mut subscription = Subscription::new(new.tier, new.term, new.subject);
        if let Some(customer) = new.stripe_customer_id {
            subscription = subscription.with_stripe_customer(customer);
        }

        Ok(self.store.insert(subscription).await?)
    }

    /// Renew a subscription.
    ///
    /// Sets `next_renewal` to the explicit date if given, otherwise one
    /// term forward from the current instant. Not idempotent: two calls in
    /// quick succession produce two different renewal dates because each
    /// anchors at its own "now".
    ///
    /// # Arguments
    ///
    /// * `id` - Subscription to renew
    /// * `explicit` - Renewal date override
    #[instrument(skip(self), fields(subscription_id = %id))]
    pub async fn renew(
        &self,
        id: Uuid,
        explicit: Option<DateTime<Utc>>,
    ) -> BillingResult<Subscription> {
        debug!("Renewing subscription");

        let mut subscription = self
            .store
            .get(id)
            .await?
            .ok_or(BillingError::SubscriptionNotFound)?;

        subscription.update_renewal(explicit);
        Ok(self.store.update(subscription).await?)
    }

    /// Fetch the subscription held by a user.
    ///
    /// Absence is a valid outcome, not an error; the user itself must
    /// exist.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn current_for_user(&self, user_id: Uuid) -> BillingResult<Option<Subscription>> {
        self.directory
            .user(user_id)
            .await?
            .ok_or(BillingError::UserNotFound)?;

        Ok(self.store.find_for_user(user_id).await?)
    }

    /// Fetch the subscription held by an organization.
    ///
    /// Absence is a valid outcome, not an error; the organization itself
    /// must exist.
    #[instrument(skip(self), fields(organization_id = %organization_id))]
    pub async fn current_for_organization(
        &self,
        organization_id: Uuid,
    ) -> BillingResult<Option<Subscription>> {
        self.directory
            .organization(organization_id)
            .await?
            .ok_or(BillingError::OrganizationNotFound)?;

        Ok(self.store.find_for_organization(organization_id).await?)
    }

    /// List an organization's members with their personal subscriptions.
    ///
    /// The requester must hold a relation to the organization; any role
    /// suffices. Members without a subscription appear with `None`.
    ///
    /// # Arguments
    ///
    /// * `requester` - The authenticated user asking for the roster
    /// * `organization_id` - The organization to list
    #[instrument(skip(self), fields(requester = %requester, organization_id = %organization_id))]
    pub async fn subscribed_members(
        &self,
        requester: Uuid,
        organization_id: Uuid,
    ) -> BillingResult<Vec<MemberSubscription>> {
        debug!("Listing member subscriptions");

        self.directory
            .find_relation(requester, organization_id)
            .await?
            .ok_or(BillingError::NotAMember)?;

        let members = self.directory.users_in_organization(organization_id).await?;

        let mut roster = Vec::with_capacity(members.len());
        for member in members {
            let subscription = self.store.find_for_user(member.id).await?;
            roster.push(MemberSubscription {
                member: member.profile(),
                subscription,
            });
        }

        Ok(roster)
    }
}

// ============================================================================
// Tests
// ============================================================================
