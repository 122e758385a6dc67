//! # Tessera Directory
//!
//! This crate provides the user and organization directory for the Tessera
//! platform: accounts, multi-tenant organizations, and the role-bearing
//! relations linking the two.
//!
//! ## Overview
//!
//! The tessera-directory crate handles:
//! - **Users**: Principal accounts with opaque credential hashes
//! - **Organizations**: Tenant entities with a unique name and fixed owner
//! - **Relations**: User-organization memberships carrying a role
//! - **Roles**: Hierarchical membership levels (user < admin < owner)
//! - **Password resets**: Single-use, digest-at-rest reset tokens
//!
//! ## Architecture
//!
//! ```text
//! User
//!   ├─ Relation ─→ Organization
//!   │                 └─ owner_id ─→ User
//!   └─ organizations (denormalized membership set)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tessera_directory::{Directory, MemoryDirectory, NewUser, OrganizationRef, Role};
//!
//! # async fn demo() -> Result<(), tessera_directory::DirectoryError> {
//! let directory = Directory::new(Arc::new(MemoryDirectory::new()));
//!
//! // Register a founder together with their organization
//! let registration = directory
//!     .register_with_organization(
//!         NewUser {
//!             email: "founder@acme.example".into(),
//!             credential_hash: "$argon2id$...".into(),
//!             first_name: "Ada".into(),
//!             last_name: "Founder".into(),
//!         },
//!         OrganizationRef::Name("Acme Inc".into()),
//!         Role::Owner,
//!     )
//!     .await?;
//!
//! // Add another member
//! let member = directory
//!     .register(NewUser {
//!         email: "member@acme.example".into(),
//!         credential_hash: "$argon2id$...".into(),
//!         first_name: "Mia".into(),
//!         last_name: "Member".into(),
//!     })
//!     .await?;
//! directory
//!     .add_member(member.id, registration.organization.id, Role::User)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate is designed to work with:
//! - `tessera-auth`: Token identity and authorization decisions
//! - `tessera-billing`: Subscription entitlements for users and organizations
//! - `tessera-gateway`: The operation facade consumed by transports

pub mod directory;
pub mod error;
pub mod membership;
pub mod organization;
pub mod roles;
pub mod store;
pub mod user;

// Re-export main types for convenience
pub use directory::{digest_token, Directory, NewUser, OrganizationRef, Registration};
pub use error::{DirectoryError, DirectoryResult};
pub use membership::{OrganizationMember, Relation, UserOrganization};
pub use organization::{Organization, OrganizationSummary};
pub use roles::Role;
pub use store::{DirectoryStore, MemoryDirectory, StoreError, StoreResult};
pub use user::{PasswordReset, User, UserProfile};
