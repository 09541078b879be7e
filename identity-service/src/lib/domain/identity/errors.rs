use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error reported by identity store adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Email uniqueness constraint violated
    #[error("Identity already exists for email: {0}")]
    DuplicateKey(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for credential operations.
///
/// `CredentialsTaken` and `InvalidCredentials` are the only conditions the
/// service translates from lower-level signals; everything else passes
/// through unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    // Domain-level errors
    #[error("Credentials taken")]
    CredentialsTaken,

    #[error("Credentials incorrect")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Configuration fault: {0}")]
    ConfigurationFault(String),

    // Infrastructure errors
    #[error("Identity store error: {0}")]
    Store(#[from] StoreError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Internal error: {0}")]
    Internal(String),
}
