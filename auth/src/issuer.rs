use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::IdentityClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Lifetime of every access token, in minutes.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Signed bearer token handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Compact JWS string
    pub access_token: String,
}

/// Issues and verifies time-bounded access tokens.
///
/// Holds only read-only signing keys, so a single instance can be shared
/// across tasks behind an `Arc` without locking.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create a token issuer from the process signing secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret
    ///
    /// # Errors
    /// * `MissingSecret` - `secret` is empty; treat as a startup fault
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self {
            jwt_handler: JwtHandler::new(secret)?,
            ttl: Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
        })
    }

    /// Token lifetime applied to every issued token.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, valid from now for the fixed lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: IdentityClaims) -> Result<AccessToken, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if it were minted at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_at(
        &self,
        subject: IdentityClaims,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, JwtError> {
        let claims = Claims::for_identity(subject, issued_at, self.ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AccessToken { access_token })
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `InvalidToken` - Expired, wrongly signed or malformed
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    ///
    /// # Errors
    /// * `InvalidToken` - Expired, wrongly signed or malformed
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            tracing::debug!(sub = claims.sub, exp = claims.exp, "JWT expired");
            return Err(JwtError::InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(SECRET).unwrap();

        let token = issuer
            .issue(IdentityClaims::new(1, "f@test.com"))
            .expect("Failed to issue token");
        let claims = issuer
            .verify(&token.access_token)
            .expect("Failed to verify token");

        assert_eq!(claims.sub, 1);
        assert_eq!(claims.email, "f@test.com");
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_MINUTES * 60);
    }

    #[test]
    fn test_expiry_boundary() {
        let issuer = TokenIssuer::new(SECRET).unwrap();
        let issued_at = Utc::now();

        let token = issuer
            .issue_at(IdentityClaims::new(1, "f@test.com"), issued_at)
            .unwrap();

        assert!(issuer
            .verify_at(&token.access_token, issued_at + Duration::minutes(14))
            .is_ok());
        assert_eq!(
            issuer.verify_at(&token.access_token, issued_at + Duration::minutes(16)),
            Err(JwtError::InvalidToken)
        );
    }

    #[test]
    fn test_expired_token_rejected_against_clock() {
        let issuer = TokenIssuer::new(SECRET).unwrap();

        let stale = issuer
            .issue_at(
                IdentityClaims::new(1, "f@test.com"),
                Utc::now() - Duration::minutes(16),
            )
            .unwrap();
        let fresh = issuer
            .issue_at(
                IdentityClaims::new(1, "f@test.com"),
                Utc::now() - Duration::minutes(14),
            )
            .unwrap();

        assert_eq!(
            issuer.verify(&stale.access_token),
            Err(JwtError::InvalidToken)
        );
        assert!(issuer.verify(&fresh.access_token).is_ok());
    }

    #[test]
    fn test_tokens_issued_in_same_second_are_distinct() {
        let issuer = TokenIssuer::new(SECRET).unwrap();
        let issued_at = Utc::now();

        let first = issuer
            .issue_at(IdentityClaims::new(1, "f@test.com"), issued_at)
            .unwrap();
        let second = issuer
            .issue_at(IdentityClaims::new(1, "f@test.com"), issued_at)
            .unwrap();

        assert_ne!(first, second);
        let first = issuer.verify(&first.access_token).unwrap();
        let second = issuer.verify(&second.access_token).unwrap();
        assert_eq!(first.iat, second.iat);
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let issuer = TokenIssuer::new(SECRET).unwrap();
        let other = TokenIssuer::new(b"another_secret_key_at_least_32_bytes").unwrap();

        let token = other.issue(IdentityClaims::new(1, "f@test.com")).unwrap();

        assert_eq!(
            issuer.verify(&token.access_token),
            Err(JwtError::InvalidToken)
        );
    }

    #[test]
    fn test_empty_secret_is_configuration_fault() {
        assert!(matches!(
            TokenIssuer::new(b""),
            Err(JwtError::MissingSecret)
        ));
    }

    #[test]
    fn test_wire_shape() {
        let issuer = TokenIssuer::new(SECRET).unwrap();
        let handler = JwtHandler::new(SECRET).unwrap();

        let token = issuer.issue(IdentityClaims::new(9, "f@test.com")).unwrap();
        let payload: serde_json::Value = handler.decode(&token.access_token).unwrap();

        assert_eq!(payload["sub"], 9);
        assert_eq!(payload["email"], "f@test.com");
        assert!(payload["exp"].is_i64());
        assert!(payload["iat"].is_i64());
        assert!(payload["jti"].is_string());

        let body = serde_json::to_value(&token).unwrap();
        assert!(body["access_token"].is_string());
    }
}
