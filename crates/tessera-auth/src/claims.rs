//! Token claims
//!
//! Claims carried by an access token. The subject is the principal's user
//! id; issue and expiry instants are unix timestamps as JWT requires.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the principal's user id
    pub sub: String,

    /// Issued-at time (unix timestamp)
    pub iat: i64,

    /// Expiration time (unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a principal with the given lifetime.
    ///
    /// # Arguments
    ///
    /// * `principal` - User id the token identifies
    /// * `ttl` - How long the token stays valid
    pub fn new(principal: Uuid, ttl: chrono::Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: principal.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Parse the subject back into a user id.
    ///
    /// Returns `None` when the subject is not a UUID, which means the token
    /// was minted by someone else entirely.
    pub fn principal_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Check whether the claims have expired.
    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }

    /// Expiry instant as a `DateTime`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
