//! Subscription records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::plan::{Term, Tier};
use crate::renewal::compute_renewal;
use crate::subject::SubscriptionSubject;

/// A subscription entitling a subject to a tier.
///
/// There is no modeled expired or cancelled state; a subscription whose
/// `next_renewal` has passed stays active until someone renews it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique subscription identifier
    pub id: Uuid,

    /// Granted tier
    pub tier: Tier,

    /// Billing term
    pub term: Term,

    /// Who holds the subscription
    #[serde(flatten)]
    pub subject: SubscriptionSubject,

    /// Payment-processor customer reference, when one exists
    #[serde(rename = "stripeCustomerID", skip_serializing_if = "Option::is_none", default)]
    pub stripe_customer_id: Option<String>,

    /// When the current billing period ends
    #[serde(rename = "nextRenewal")]
    pub next_renewal: DateTime<Utc>,

    /// When the subscription was created
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// When the subscription was last updated
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a new subscription with the renewal anchored at the creation
    /// instant.
    ///
    /// # Arguments
    ///
    /// * `tier` - Granted tier
    /// * `term` - Billing term
    /// * `subject` - Who holds the subscription
    pub fn new(tier: Tier, term: Term, subject: SubscriptionSubject) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::now_v7(),
            tier,
            term,
            subject,
            stripe_customer_id: None,
            next_renewal: compute_renewal(term, now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach a payment-processor customer reference.
    pub fn with_stripe_customer(mut self, customer: impl Into<String>) -> Self {
        self.stripe_customer_id = Some(customer.into());
        self
    }

    /// Move the renewal date to an explicit instant, or one term forward
    /// from now.
    ///
    /// Each call without an explicit date re-anchors at the current
    /// instant, so repeated calls keep pushing the date forward.
    pub fn update_renewal(&mut self, explicit: Option<DateTime<Utc>>) {
        self.next_renewal = explicit.unwrap_or_else(|| compute_renewal(self.term, Utc::now()));
        self.updated_at = Utc::now();
    }
}
