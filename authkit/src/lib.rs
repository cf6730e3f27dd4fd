//! Credential and session-token library
//!
//! Provides the security core for the account service:
//! - Password hashing and verification (Argon2id)
//! - Signed, expiring access tokens (JWT, pinned to HS256)
//! - An `Authenticator` coordinator bound to an immutable configuration
//!
//! Time is injected through the [`Clock`] trait so token-expiry behaviour
//! is deterministic under test.
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use authkit::{HashingCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::new(HashingCost::default()).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Complete flow
//! ```
//! use std::sync::Arc;
//! use authkit::{AuthConfig, Authenticator, HashingCost, SystemClock};
//!
//! let config = AuthConfig {
//!     signing_key: b"secret_key_at_least_32_bytes_long!".to_vec(),
//!     token_ttl: chrono::Duration::minutes(30),
//!     hashing_cost: HashingCost::default(),
//! };
//! let auth = Authenticator::new(config, Arc::new(SystemClock)).unwrap();
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("correct-horse").unwrap();
//!
//! // Login: verify and mint a token
//! assert!(auth.verify_password("correct-horse", &hash));
//! let token = auth.issue_token("user123").unwrap();
//!
//! // Protected access: verify the token and recover the subject
//! let claims = auth.verify_token(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod clock;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthConfig;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenHandler;
