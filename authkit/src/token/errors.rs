use thiserror::Error;

/// Error type for token operations.
///
/// Callers treat these differently: `Expired` means prompt a re-login,
/// while `Malformed` and `BadSignature` are rejected outright and logged
/// as suspicious. None of the detail is ever echoed to a client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is structurally invalid: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuance failed: {0}")]
    Issuance(String),
}
