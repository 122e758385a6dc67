//! Membership domain models
//!
//! This module provides the Relation entity linking users to organizations.
//! Relations are the edges of the membership graph that authorization
//! decisions walk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::organization::OrganizationSummary;
use crate::roles::Role;

/// A relation links a user to an organization with a role.
///
/// At most one relation exists per (user, organization) pair; the store
/// rejects duplicates. Queries over relations carry no ordering guarantees.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use tessera_directory::{Relation, Role};
///
/// let user_id = Uuid::now_v7();
/// let org_id = Uuid::now_v7();
/// let relation = Relation::new(user_id, org_id, Role::Admin);
/// assert!(relation.role.is_elevated());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// User ID
    pub user_id: Uuid,

    /// Organization ID
    pub organization_id: Uuid,

    /// Role the user holds within the organization
    pub role: Role,

    /// When the relation was created
    pub created_at: DateTime<Utc>,
}

impl Relation {
    /// Creates a new relation.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user ID
    /// * `organization_id` - The organization ID
    /// * `role` - The user's role in the organization
    ///
    /// # Examples
    ///
    /// ```
    /// use uuid::Uuid;
    /// use tessera_directory::{Relation, Role};
    ///
    /// let relation = Relation::new(Uuid::now_v7(), Uuid::now_v7(), Role::User);
    /// ```
    pub fn new(user_id: Uuid, organization_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            organization_id,
            role,
            created_at: Utc::now(),
        }
    }
}

/// A member of an organization joined with their role.
///
/// This is the roster view: user identity fields plus the role their
/// relation carries. Field names follow the public API contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMember {
    /// User ID
    pub id: Uuid,

    /// Email address
    pub email: String,

    /// Given name
    #[serde(rename = "firstName")]
    pub first_name: String,

    /// Family name
    #[serde(rename = "lastName")]
    pub last_name: String,

    /// Role within the organization
    pub role: Role,
}

/// One of a user's memberships joined with the organization it points at.
///
/// This is the user-side view of the membership graph, mirroring
/// [`OrganizationMember`] on the organization side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserOrganization {
    /// The organization the user belongs to
    pub organization: OrganizationSummary,

    /// Role the user holds there
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_creation() {
        let user_id = Uuid::now_v7();
        let org_id = Uuid::now_v7();
        let relation = Relation::new(user_id, org_id, Role::Owner);

        assert_eq!(relation.user_id, user_id);
        assert_eq!(relation.organization_id, org_id);
        assert_eq!(relation.role, Role::Owner);
    }

    #[test]
    fn test_relation_wire_form() {
        let relation = Relation::new(Uuid::now_v7(), Uuid::now_v7(), Role::Admin);
        let json = serde_json::to_value(&relation).unwrap();

        assert_eq!(json["role"], "admin");
    }
}
