use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Access-token payload.
///
/// All three fields are required; a token missing any of them fails
/// verification as malformed. No other state travels in the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject with an expiry derived from the TTL.
    pub fn new(subject: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Whether the token is expired at the given instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_derived_from_ttl() {
        let issued_at = Utc::now();
        let claims = Claims::new("user123", issued_at, Duration::minutes(30));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_is_expired_boundary() {
        let issued_at = Utc::now();
        let ttl = Duration::minutes(30);
        let claims = Claims::new("user123", issued_at, ttl);

        assert!(!claims.is_expired(issued_at));
        assert!(!claims.is_expired(issued_at + ttl - Duration::seconds(1)));
        assert!(claims.is_expired(issued_at + ttl));
        assert!(claims.is_expired(issued_at + ttl + Duration::seconds(1)));
    }
}
