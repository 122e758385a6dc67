//! Organization domain models
//!
//! This module provides the core Organization entity for multi-tenant
//! grouping. Organizations are the tenant boundary: memberships, elevated
//! roles, and organization-scoped subscriptions all hang off them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization represents a tenant in the multi-tenant system.
///
/// Users can belong to multiple organizations with different roles. The
/// organization name is unique across the whole platform, and the owner
/// reference never changes after creation.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use tessera_directory::Organization;
///
/// let owner_id = Uuid::now_v7();
/// let org = Organization::new("Acme Inc", owner_id);
/// assert_eq!(org.name, "Acme Inc");
/// assert_eq!(org.owner_id, owner_id);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier for the organization
    pub id: Uuid,

    /// Human-readable name (unique across the platform)
    pub name: String,

    /// Owner user ID (the user who created the org; immutable)
    pub owner_id: Uuid,

    /// When the organization was created
    pub created_at: DateTime<Utc>,
}

impl Organization {
    /// Creates a new organization.
    ///
    /// The organization is created with:
    /// - A newly generated UUID v7 ID
    /// - Current timestamp for created_at
    ///
    /// # Arguments
    ///
    /// * `name` - The organization name (must be unique; enforced by the store)
    /// * `owner_id` - The user ID who owns this organization
    ///
    /// # Examples
    ///
    /// ```
    /// use uuid::Uuid;
    /// use tessera_directory::Organization;
    ///
    /// let owner_id = Uuid::now_v7();
    /// let org = Organization::new("Acme Inc", owner_id);
    /// ```
    pub fn new(name: impl Into<String>, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Build the wire-safe summary view of this organization.
    pub fn summary(&self) -> OrganizationSummary {
        OrganizationSummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Summary of an organization for list displays and API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSummary {
    /// Organization ID
    pub id: Uuid,

    /// Organization name
    pub name: String,
}
