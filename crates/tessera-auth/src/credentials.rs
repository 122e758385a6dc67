//! Credential hashing
//!
//! The directory stores only a hash of each user's password; this module
//! defines the interface that produces and checks those hashes. Deployments
//! inject their own scheme, typically backed by a memory-hard KDF such as
//! argon2 or bcrypt. [`Sha256Credentials`] is the salted built-in used by
//! tests and single-process setups.

/// Produces and checks stored credential hashes.
///
/// Implementations must be deterministic per stored hash: `verify` applied
/// to the output of `hash` with the same secret returns true.
pub trait CredentialScheme: Send + Sync {
    /// Hash a plaintext secret for at-rest storage.
    fn hash(&self, secret: &str) -> String;

    /// Check a candidate secret against a stored hash.
    fn verify(&self, candidate: &str, credential_hash: &str) -> bool;
}

/// Salted SHA-256 credential scheme.
///
/// Stored hashes have the shape `{salt}${digest}` with a fresh random salt
/// per hash, so equal passwords never produce equal records.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Credentials;

impl Sha256Credentials {
    /// Create the scheme.
    pub fn new() -> Self {
        Self
    }
}

impl CredentialScheme for Sha256Credentials {
    fn hash(&self, secret: &str) -> String {
        use rand::Rng;
        let salt: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();

        format!("{}${}", salt, salted_digest(&salt, secret))
    }

    fn verify(&self, candidate: &str, credential_hash: &str) -> bool {
        match credential_hash.split_once('$') {
            Some((salt, digest)) => salted_digest(salt, candidate) == digest,
            None => false,
        }
    }
}

fn salted_digest(salt: &str, secret: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(secret.as_bytes());
    let hash = hasher.finalize();
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, hash)
}
