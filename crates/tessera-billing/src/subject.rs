//! Subscription subjects
//!
//! A subscription is held by exactly one subject: a user or an
//! organization. Representing the subject as an enum makes the
//! both-at-once state unrepresentable while keeping the wire form
//! `{"user": <id>}` / `{"organization": <id>}`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The holder of a subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionSubject {
    /// A personal subscription held by a user
    User(Uuid),

    /// A subscription held by an organization
    Organization(Uuid),
}

impl SubscriptionSubject {
    /// The user id when the subject is a user.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            SubscriptionSubject::User(id) => Some(*id),
            SubscriptionSubject::Organization(_) => None,
        }
    }

    /// The organization id when the subject is an organization.
    pub fn organization_id(&self) -> Option<Uuid> {
        match self {
            SubscriptionSubject::User(_) => None,
            SubscriptionSubject::Organization(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_form_is_single_keyed() {
        let id = Uuid::now_v7();

        let user = serde_json::to_value(SubscriptionSubject::User(id)).unwrap();
        assert_eq!(user, serde_json::json!({ "user": id.to_string() }));

        let org = serde_json::to_value(SubscriptionSubject::Organization(id)).unwrap();
        assert_eq!(org, serde_json::json!({ "organization": id.to_string() }));
    }

    #[test]
    fn test_accessors_are_exclusive() {
        let id = Uuid::now_v7();

        let subject = SubscriptionSubject::User(id);
        assert_eq!(subject.user_id(), Some(id));
        assert_eq!(subject.organization_id(), None);

        let subject = SubscriptionSubject::Organization(id);
        assert_eq!(subject.user_id(), None);
        assert_eq!(subject.organization_id(), Some(id));
    }
}
