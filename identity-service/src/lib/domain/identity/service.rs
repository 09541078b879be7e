use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessToken;
use auth::Claims;
use auth::IdentityClaims;
use auth::PasswordHasher;
use auth::TokenIssuer;

use crate::domain::identity::models::Credentials;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::NewIdentity;
use crate::identity::errors::CredentialError;
use crate::identity::errors::StoreError;
use crate::identity::ports::CredentialServicePort;
use crate::identity::ports::IdentityStore;

/// Domain service implementation for credential operations.
///
/// Stateless apart from injected collaborators; share it behind an `Arc`.
pub struct CredentialService<S>
where
    S: IdentityStore,
{
    store: Arc<S>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
}

impl<S> CredentialService<S>
where
    S: IdentityStore,
{
    /// Create a new credential service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Identity persistence implementation
    /// * `token_issuer` - Token issuer built from the process signing secret
    ///
    /// # Returns
    /// Configured credential service instance
    pub fn new(store: Arc<S>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            store,
            token_issuer,
            password_hasher: PasswordHasher::new(),
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, CredentialError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CredentialError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(CredentialError::from)
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, CredentialError> {
        let hasher = self.password_hasher;

        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| {
                CredentialError::Internal(format!("Password verification task failed: {}", e))
            })?
            .map_err(CredentialError::from)
    }

    fn issue_token(&self, identity: &Identity) -> Result<AccessToken, CredentialError> {
        let subject = IdentityClaims::new(identity.id.0, identity.email.clone());

        Ok(self.token_issuer.issue(subject)?)
    }
}

#[async_trait]
impl<S> CredentialServicePort for CredentialService<S>
where
    S: IdentityStore,
{
    async fn register(&self, credentials: Credentials) -> Result<AccessToken, CredentialError> {
        let password_hash = self.hash_password(credentials.password).await?;

        let identity = self
            .store
            .create_identity(NewIdentity::new(credentials.email, password_hash))
            .await
            .map_err(|e| match e {
                StoreError::DuplicateKey(_) => {
                    tracing::info!("Registration rejected: credentials taken");
                    CredentialError::CredentialsTaken
                }
                other => {
                    tracing::error!(error = %other, "Failed to create identity");
                    CredentialError::Store(other)
                }
            })?;

        let token = self.issue_token(&identity)?;
        tracing::info!(identity_id = %identity.id, "Identity registered");

        Ok(token)
    }

    async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<AccessToken, CredentialError> {
        let found = self
            .store
            .find_by_email(&credentials.email)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to look up identity");
                CredentialError::Store(e)
            })?;

        // Unknown email and wrong password collapse into one outcome so
        // callers cannot probe which emails are registered.
        let verified = match found {
            Some(identity) => {
                let matches = self
                    .verify_password(credentials.password, identity.password_hash.clone())
                    .await?;
                matches.then_some(identity)
            }
            None => None,
        };

        let Some(identity) = verified else {
            tracing::info!("Authentication rejected: invalid credentials");
            return Err(CredentialError::InvalidCredentials);
        };

        let token = self.issue_token(&identity)?;
        tracing::info!(identity_id = %identity.id, "Identity authenticated");

        Ok(token)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError> {
        self.token_issuer
            .verify(token)
            .map_err(|_| CredentialError::InvalidToken)
    }
}
