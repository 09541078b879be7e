use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Identity snapshot asserted by an access token.
///
/// Taken from the identity record at issuance time and never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    /// Identity identifier assigned by the store
    pub sub: i64,
    /// Identity email as stored
    pub email: String,
}

impl IdentityClaims {
    pub fn new(sub: i64, email: impl Into<String>) -> Self {
        Self {
            sub,
            email: email.into(),
        }
    }
}

/// Access token payload.
///
/// Wire shape:
/// `{"sub": <int>, "email": <string>, "iat": <int>, "exp": <int>, "jti": <uuid>}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: i64,

    /// Identity email
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID, unique per issued token
    pub jti: String,
}

impl Claims {
    /// Build claims for an identity issued at `issued_at` and valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identity snapshot to assert
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Claims with `exp = iat + ttl` and a fresh random `jti`
    pub fn for_identity(subject: IdentityClaims, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        Self {
            sub: subject.sub,
            email: subject.email,
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is no longer accepted at or after its `exp` instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_for_identity() {
        let issued_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        let claims = Claims::for_identity(
            IdentityClaims::new(7, "f@test.com"),
            issued_at,
            Duration::minutes(15),
        );

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "f@test.com");
        assert_eq!(claims.iat, issued_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims {
            sub: 1,
            email: "a@b.c".to_string(),
            iat: 100,
            exp: 1000,
            jti: "token-1".to_string(),
        };

        assert!(!claims.is_expired(999));
        assert!(claims.is_expired(1000));
        assert!(claims.is_expired(1001));
    }
}
