use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures are deliberately a single variant: expiry, bad
/// signature and malformed input are indistinguishable to callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token signing secret is missing or empty")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid or expired")]
    InvalidToken,
}
