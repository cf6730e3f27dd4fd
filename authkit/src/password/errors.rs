use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is NOT an error; [`PasswordHasher::verify`] reports it
/// as `false`. These variants cover malformed input and internal failures
/// only.
///
/// [`PasswordHasher::verify`]: super::PasswordHasher::verify
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Secret must not be empty")]
    EmptySecret,

    #[error("Secret exceeds maximum length of {max} bytes")]
    SecretTooLong { max: usize },

    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
