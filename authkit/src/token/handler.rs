use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::clock::Clock;

/// Token issuer and verifier.
///
/// The signing algorithm is pinned to HS256 at construction. Verification
/// checks the signature against the pinned algorithm before any claim is
/// inspected; a token whose header names any other algorithm is rejected
/// no matter what its claims say.
pub struct TokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenHandler {
    /// Create a handler with a signing key and token lifetime.
    ///
    /// # Arguments
    /// * `signing_key` - Shared secret for HS256; at least 32 bytes recommended
    /// * `ttl` - Validity window of issued tokens
    /// * `clock` - Time source used for both issuance and expiry checks
    pub fn new(signing_key: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            algorithm: Algorithm::HS256,
            ttl,
            clock,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// Encodes `{subject, issued-at, expires-at}` where the expiry is
    /// the clock's current instant plus the configured TTL. The result is
    /// a self-contained string suitable as a bearer credential.
    ///
    /// # Errors
    /// * `Issuance` - Encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let claims = Claims::new(subject, self.clock.now(), self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issuance(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Signature and algorithm are checked first; expiry is then checked
    /// against the injected clock, never against ambient system time.
    ///
    /// # Errors
    /// * `Malformed` - Not structurally a token, or required claims missing
    /// * `BadSignature` - Tampered, signed with a different key, or signed
    ///   with an algorithm other than the pinned one
    /// * `Expired` - Signature valid but the expiry has passed
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the injected clock.
        validation.validate_exp = false;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                        TokenError::BadSignature
                    }
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
