use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Upper bound on accepted secret length. Anything longer is rejected as
/// malformed input rather than fed to the hash function.
const MAX_SECRET_BYTES: usize = 1024;

/// Tunable work factor for password hashing.
///
/// Maps directly onto Argon2 parameters. Higher values slow down
/// brute-force attempts at the price of slower logins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    /// Memory usage in KiB.
    pub memory_kib: u32,
    /// Number of passes over memory.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashingCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password hashing implementation.
///
/// Argon2id with a random per-hash salt; output is a PHC string that
/// embeds algorithm, parameters, salt, and digest.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the given work factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Parameters outside the ranges Argon2 accepts
    pub fn new(cost: HashingCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext secret for storage.
    ///
    /// Two calls with the same secret produce different hashes (fresh
    /// salt each time); both verify against the original secret.
    ///
    /// # Errors
    /// * `EmptySecret` / `SecretTooLong` - Malformed input
    /// * `HashingFailed` - Argon2 operation failed
    pub fn hash(&self, secret: &str) -> Result<String, PasswordError> {
        Self::check_secret(secret)?;

        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a secret against a stored hash.
    ///
    /// Returns `false` for a wrong secret, a malformed secret, or a
    /// malformed stored hash. Comparison is performed by Argon2 over the
    /// full digest, so timing does not correlate with matching prefixes.
    pub fn verify(&self, secret: &str, stored_hash: &str) -> bool {
        if Self::check_secret(secret).is_err() {
            return false;
        }

        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "stored credential hash is not a valid PHC string");
                return false;
            }
        };

        self.argon2
            .verify_password(secret.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn check_secret(secret: &str) -> Result<(), PasswordError> {
        if secret.is_empty() {
            return Err(PasswordError::EmptySecret);
        }
        if secret.len() > MAX_SECRET_BYTES {
            return Err(PasswordError::SecretTooLong {
                max: MAX_SECRET_BYTES,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> PasswordHasher {
        // Low cost keeps the test suite fast; production uses defaults.
        PasswordHasher::new(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = test_hasher();
        let secret = "my_secure_password";

        let hash = hasher.hash(secret).expect("Failed to hash password");

        assert!(hasher.verify(secret, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hashing_is_salted() {
        let hasher = test_hasher();
        let secret = "my_secure_password";

        let first = hasher.hash(secret).expect("Failed to hash password");
        let second = hasher.hash(secret).expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify(secret, &first));
        assert!(hasher.verify(secret, &second));
    }

    #[test]
    fn test_hash_rejects_empty_secret() {
        let hasher = test_hasher();
        assert_eq!(hasher.hash(""), Err(PasswordError::EmptySecret));
    }

    #[test]
    fn test_hash_rejects_oversized_secret() {
        let hasher = test_hasher();
        let oversized = "x".repeat(MAX_SECRET_BYTES + 1);
        assert!(matches!(
            hasher.hash(&oversized),
            Err(PasswordError::SecretTooLong { .. })
        ));
    }

    #[test]
    fn test_verify_malformed_hash_is_false_not_error() {
        let hasher = test_hasher();
        assert!(!hasher.verify("password", "not_a_phc_string"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = PasswordHasher::new(HashingCost {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        });
        assert!(matches!(result, Err(PasswordError::InvalidCost(_))));
    }
}
