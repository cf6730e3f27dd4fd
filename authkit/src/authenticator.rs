use std::fmt;
use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::password::HashingCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenError;
use crate::token::TokenHandler;

/// Immutable authentication configuration.
///
/// Loaded once at process start and handed to [`Authenticator::new`];
/// nothing mutates it afterwards. Key rotation is a separate design and
/// not supported within a process lifetime.
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared secret for token signing. Never transmitted to clients.
    pub signing_key: Vec<u8>,
    /// Validity window of issued tokens.
    pub token_ttl: Duration,
    /// Work factor for password hashing.
    pub hashing_cost: HashingCost,
}

// The signing key must never appear in logs or debug output.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("hashing_cost", &self.hashing_cost)
            .finish()
    }
}

/// Authentication coordinator combining password hashing and token
/// handling behind one immutable configuration.
///
/// Holds no persistent state; the user directory lives with the caller.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_handler: TokenHandler,
}

impl Authenticator {
    /// Create an authenticator from configuration and a time source.
    ///
    /// # Errors
    /// * `InvalidCost` - Hashing parameters outside accepted ranges
    pub fn new(config: AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(config.hashing_cost)?,
            token_handler: TokenHandler::new(&config.signing_key, config.token_ttl, clock),
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `EmptySecret` / `SecretTooLong` - Malformed input
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// A wrong password is an expected outcome and reported as `false`,
    /// never as an error.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue an access token for a subject.
    ///
    /// # Errors
    /// * `Issuance` - Token encoding failed
    pub fn issue_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_handler.issue(subject)
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `Malformed` / `BadSignature` / `Expired` - See [`TokenError`]
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_handler.verify(token)
    }
}
