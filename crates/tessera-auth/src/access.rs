//! Authorization decisions
//!
//! This module decides whether a principal may act on another user's
//! records. A principal always reaches their own records; reaching anyone
//! else requires an admin or owner role in an organization the target
//! belongs to.

use std::collections::HashSet;

use tracing::{debug, instrument};
use uuid::Uuid;

use tessera_directory::DirectoryStore;

use crate::error::{AuthError, AuthResult};

/// The grounds on which a principal may act on a target user's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The principal is the target
    SelfAccess,

    /// The principal holds an elevated role in an organization shared with
    /// the target
    Elevated {
        /// One organization granting the elevated role
        organization_id: Uuid,
    },
}

/// Decide whether a principal may act on a target user's records.
///
/// The check reads each side's relations once and intersects the
/// organization sets, so its cost does not grow with how many organizations
/// either side belongs to. A target with no memberships fails closed.
///
/// # Arguments
///
/// * `store` - Directory store holding the relations
/// * `principal` - The authenticated user making the request
/// * `target` - The user whose records are being accessed
///
/// # Returns
///
/// The access grounds, or [`AuthError::Forbidden`] when the principal has
/// no elevated role in any shared organization
#[instrument(skip(store), fields(principal = %principal, target = %target))]
pub async fn authorize(
    store: &dyn DirectoryStore,
    principal: Uuid,
    target: Uuid,
) -> AuthResult<Access> {
    if principal == target {
        debug!("Self access granted");
        return Ok(Access::SelfAccess);
    }

    let target_organizations: HashSet<Uuid> = store
        .relations_for_user(target)
        .await?
        .into_iter()
        .map(|r| r.organization_id)
        .collect();

    let shared = store
        .relations_for_user(principal)
        .await?
        .into_iter()
        .filter(|r| r.role.is_elevated())
        .map(|r| r.organization_id)
        .find(|org| target_organizations.contains(org));

    match shared {
        Some(organization_id) => {
            debug!(organization_id = %organization_id, "Elevated access granted");
            Ok(Access::Elevated { organization_id })
        }
        None => {
            debug!("No elevated role in any shared organization");
            Err(AuthError::Forbidden)
        }
    }
}
