use async_trait::async_trait;
use auth::AccessToken;
use auth::Claims;

use crate::domain::identity::models::Credentials;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::NewIdentity;
use crate::identity::errors::CredentialError;
use crate::identity::errors::StoreError;

/// Port for credential operations exposed to callers.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register a new identity and issue its first access token.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password
    ///
    /// # Returns
    /// Access token asserting the new identity
    ///
    /// # Errors
    /// * `CredentialsTaken` - Email is already registered
    /// * `Store` - Any other identity store failure, unchanged
    /// * `Password` - Hashing failed
    /// * `Token` - Token signing failed
    async fn register(&self, credentials: Credentials) -> Result<AccessToken, CredentialError>;

    /// Verify credentials and issue a fresh access token.
    ///
    /// # Arguments
    /// * `credentials` - Email and plaintext password
    ///
    /// # Returns
    /// Access token asserting the matching identity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (not distinguished)
    /// * `Store` - Identity store failure, unchanged
    /// * `Password` - Stored hash is malformed
    /// * `Token` - Token signing failed
    async fn authenticate(&self, credentials: Credentials)
        -> Result<AccessToken, CredentialError>;

    /// Verify a previously issued access token.
    ///
    /// # Arguments
    /// * `token` - Compact JWS string
    ///
    /// # Returns
    /// Claims carried by the token
    ///
    /// # Errors
    /// * `InvalidToken` - Expired, wrongly signed or malformed
    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError>;
}

/// Persistence operations for identities.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// Uniqueness of `email` must be enforced atomically: of two concurrent
    /// calls with the same email exactly one succeeds.
    ///
    /// # Arguments
    /// * `identity` - Email and password hash to store
    ///
    /// # Returns
    /// Stored identity with its assigned id
    ///
    /// # Errors
    /// * `DuplicateKey` - Email is already registered
    /// * `Database` - Storage operation failed
    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity, StoreError>;

    /// Retrieve identity by email address.
    ///
    /// # Arguments
    /// * `email` - Email address, matched exactly
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;
}
