//! # Tessera Auth
//!
//! This crate provides token identity and authorization decisions for the
//! Tessera platform.
//!
//! ## Overview
//!
//! The tessera-auth crate handles:
//! - **Tokens**: HS256 access token issuing and verification
//! - **Claims**: The subject and lifetime carried by each token
//! - **Authorization**: The shared-organization elevation check
//! - **Credentials**: Hashing and checking of stored passwords
//!
//! Rejected tokens all surface the same outward error code regardless of
//! whether they were expired, tampered with, or malformed; see
//! [`AuthError::error_code`].
//!
//! ## Usage
//!
//! ### Tokens
//!
//! ```rust,no_run
//! use tessera_auth::Tokens;
//! use uuid::Uuid;
//!
//! let tokens = Tokens::with_secret("your-secret-key");
//!
//! let user_id = Uuid::now_v7();
//! let token = tokens.issue(user_id).unwrap();
//!
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.principal_id(), Some(user_id));
//! ```
//!
//! ### Authorization
//!
//! ```rust,no_run
//! use tessera_auth::{authorize, Access};
//! use tessera_directory::MemoryDirectory;
//! use uuid::Uuid;
//!
//! # async fn demo() -> tessera_auth::AuthResult<()> {
//! let store = MemoryDirectory::new();
//! let principal = Uuid::now_v7();
//! let target = Uuid::now_v7();
//!
//! match authorize(&store, principal, target).await? {
//!     Access::SelfAccess => { /* own record */ }
//!     Access::Elevated { organization_id } => { /* admin or owner there */ }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate integrates with:
//! - `tessera-directory`: Relations backing the authorization check
//! - `tessera-gateway`: Request handling and the error envelope

pub mod access;
pub mod claims;
pub mod credentials;
pub mod error;
pub mod token;

// Re-export main types
pub use access::{authorize, Access};
pub use claims::Claims;
pub use credentials::{CredentialScheme, Sha256Credentials};
pub use error::{AuthError, AuthResult};
pub use token::{bearer_token, TokenConfig, Tokens};
