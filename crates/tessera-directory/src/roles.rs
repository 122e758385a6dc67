//! Role-based membership levels
//!
//! This module defines the role a user holds within an organization.
//! Roles drive the authorization decision: elevated roles (admin, owner)
//! may act on other members of the same organization.

use serde::{Deserialize, Serialize};

/// User role within an organization.
///
/// Roles are hierarchical, with each role inheriting the permissions of lower roles.
/// The hierarchy is: User < Admin < Owner
///
/// # Permission Model
///
/// - **User**: Ordinary member, may act on their own account only
/// - **Admin**: May act on other members of the organization
/// - **Owner**: Full organization control
///
/// # Examples
///
/// ```
/// use tessera_directory::Role;
///
/// let role = Role::Admin;
/// assert!(role.is_elevated());
/// assert!(!Role::User.is_elevated());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary member
    User = 1,

    /// Can act on other members
    Admin = 2,

    /// Full organization control
    Owner = 3,
}

impl Role {
    /// Check if this role carries elevated privileges.
    ///
    /// Elevated roles may act on other members of a shared organization.
    ///
    /// # Returns
    ///
    /// `true` for Admin and Owner roles
    pub fn is_elevated(&self) -> bool {
        *self >= Role::Admin
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_directory::Role;
    ///
    /// assert_eq!(Role::parse("admin"), Some(Role::Admin));
    /// assert_eq!(Role::parse("OWNER"), Some(Role::Owner));
    /// assert_eq!(Role::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// Get string representation of the role.
    ///
    /// # Returns
    ///
    /// Lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_directory::Role;
    ///
    /// assert_eq!(Role::Admin.as_str(), "admin");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_directory::Role;
    ///
    /// assert_eq!(Role::Admin.display_name(), "Admin");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
            Self::Owner => "Owner",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_hierarchy() {
        assert!(Role::Owner > Role::Admin);
        assert!(Role::Admin > Role::User);
    }

    #[test]
    fn test_elevated_roles() {
        assert!(!Role::User.is_elevated());
        assert!(Role::Admin.is_elevated());
        assert!(Role::Owner.is_elevated());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("OWNER"), Some(Role::Owner));
        assert_eq!(Role::parse("user"), Some(Role::User));
        assert_eq!(Role::parse("invalid"), None);
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Admin, Role::Owner] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_serde_form() {
        let json = serde_json::to_string(&Role::Owner).unwrap();
        assert_eq!(json, "\"owner\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
