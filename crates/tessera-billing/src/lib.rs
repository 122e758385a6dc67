//! # Tessera Billing
//!
//! This crate provides subscription lifecycle bookkeeping for the Tessera
//! platform: which tier a user or organization holds, on what term, and
//! when it next renews.
//!
//! ## Overview
//!
//! The tessera-billing crate handles:
//! - **Plans**: The tier and term vocabulary
//! - **Subjects**: Exactly one holder per subscription, user or organization
//! - **Renewal**: Calendar-aware renewal-date computation
//! - **Lifecycle**: Create, renew, and query operations
//!
//! It does not talk to a payment processor; the optional
//! `stripeCustomerID` is carried as opaque bookkeeping. There are no
//! expired or cancelled states, and renewal is always pulled by a caller,
//! never scheduled.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tessera_billing::{
//!     MemorySubscriptions, NewSubscription, SubscriptionSubject, Subscriptions, Term, Tier,
//! };
//! use tessera_directory::MemoryDirectory;
//! use uuid::Uuid;
//!
//! # async fn demo() -> Result<(), tessera_billing::BillingError> {
//! let directory = Arc::new(MemoryDirectory::new());
//! let subscriptions = Subscriptions::new(Arc::new(MemorySubscriptions::new()), directory);
//!
//! let subscription = subscriptions
//!     .create(NewSubscription {
//!         tier: Tier::Pro,
//!         term: Term::Monthly,
//!         subject: SubscriptionSubject::User(Uuid::now_v7()),
//!         stripe_customer_id: None,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate integrates with:
//! - `tessera-directory`: Subject existence checks and the member roster
//! - `tessera-gateway`: Request handling and the error envelope

pub mod error;
pub mod plan;
pub mod renewal;
pub mod store;
pub mod subject;
pub mod subscription;
pub mod subscriptions;

// Re-export main types
pub use error::{BillingError, BillingResult};
pub use plan::{Term, Tier};
pub use renewal::compute_renewal;
pub use store::{MemorySubscriptions, StoreError, StoreResult, SubscriptionStore};
pub use subject::SubscriptionSubject;
pub use subscription::Subscription;
pub use subscriptions::{MemberSubscription, NewSubscription, Subscriptions};
