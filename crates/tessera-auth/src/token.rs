//! Access token generation and verification
//!
//! This module signs and verifies the bearer tokens that identify a
//! principal on every request. Tokens are HS256 JWTs carrying the claims
//! from [`crate::claims::Claims`].

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use uuid::Uuid;

use crate::claims::Claims;
use crate::error::{AuthError, AuthResult};

/// Token configuration.
#[derive(Clone)]
pub struct TokenConfig {
    /// Secret key for HMAC signing
    pub secret: String,

    /// Lifetime applied to issued tokens
    pub default_ttl: Duration,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl TokenConfig {
    /// Create a configuration with the standard 14-day token lifetime.
    ///
    /// # Arguments
    ///
    /// * `secret` - The secret key for HMAC signing
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            default_ttl: Duration::days(14),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

/// Token service for issuing and verifying access tokens.
#[derive(Clone)]
pub struct Tokens {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("config", &self.config)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl Tokens {
    /// Create a new token service with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Token configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create with a secret and the default lifetime.
    ///
    /// # Arguments
    ///
    /// * `secret` - The secret key for HMAC signing
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(TokenConfig::new(secret))
    }

    /// Issue a token for a principal using the configured lifetime.
    ///
    /// # Arguments
    ///
    /// * `principal` - User id the token identifies
    ///
    /// # Returns
    ///
    /// Encoded JWT token string
    pub fn issue(&self, principal: Uuid) -> AuthResult<String> {
        self.issue_with_ttl(principal, self.config.default_ttl)
    }

    /// Issue a token with an explicit lifetime.
    ///
    /// # Arguments
    ///
    /// * `principal` - User id the token identifies
    /// * `ttl` - How long the token stays valid
    ///
    /// # Returns
    ///
    /// Encoded JWT token string
    pub fn issue_with_ttl(&self, principal: Uuid, ttl: Duration) -> AuthResult<String> {
        let claims = Claims::new(principal, ttl);
        let header = Header::new(Algorithm::HS256);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT token string
    ///
    /// # Returns
    ///
    /// Decoded claims if the signature verifies and the token has not
    /// expired
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data: TokenData<Claims> =
            decode(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Get the configuration.
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Returns `None` when the header is absent or does not carry a bearer
/// token.
///
/// # Examples
///
/// ```
/// use tessera_auth::token::bearer_token;
///
/// assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
/// assert_eq!(bearer_token(Some("Basic dXNlcg==")), None);
/// assert_eq!(bearer_token(None), None);
/// ```
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header.and_then(|value| value.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secret() -> String {
        "test-secret-key-for-token-signing-minimum-32-chars".to_string()
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = Tokens::with_secret(test_secret());
        let principal = Uuid::now_v7();

        let token = tokens.issue(principal).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.principal_id(), Some(principal));
    }

    #[test]
    fn test_default_ttl_is_fourteen_days() {
        let tokens = Tokens::with_secret(test_secret());
        let token = tokens.issue(Uuid::now_v7()).unwrap();
        let claims = tokens.verify(&token).unwrap();

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, Duration::days(14).num_seconds());
    }

    #[test]
    fn test_expired_token() {
        let tokens = Tokens::with_secret(test_secret());
        let token = tokens
            .issue_with_ttl(Uuid::now_v7(), Duration::hours(-1))
            .unwrap();

        let result = tokens.verify(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let minting = Tokens::with_secret(test_secret());
        let verifying = Tokens::with_secret("a-completely-different-secret-key-32-chars");

        let token = minting.issue(Uuid::now_v7()).unwrap();
        let result = verifying.verify(&token);

        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = Tokens::with_secret(test_secret());
        let result = tokens.verify("not-a-jwt-at-all");

        assert!(matches!(result, Err(AuthError::Malformed(_))));
    }

    #[test]
    fn test_rejections_share_outward_code() {
        let tokens = Tokens::with_secret(test_secret());
        let other = Tokens::with_secret("a-completely-different-secret-key-32-chars");

        let expired = tokens
            .issue_with_ttl(Uuid::now_v7(), Duration::hours(-1))
            .unwrap();
        let tampered = other.issue(Uuid::now_v7()).unwrap();

        let codes: Vec<&str> = [
            tokens.verify(&expired),
            tokens.verify(&tampered),
            tokens.verify("garbage"),
        ]
        .into_iter()
        .map(|r| r.unwrap_err().error_code())
        .collect();

        assert_eq!(codes, vec!["INVALID_TOKEN", "INVALID_TOKEN", "INVALID_TOKEN"]);
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(Some("bearer abc")), None);
        assert_eq!(bearer_token(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let tokens = Tokens::with_secret(test_secret());
        let rendered = format!("{:?}", tokens);

        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("test-secret-key"));
    }
}
