//! Credential primitives
//!
//! Reusable building blocks for identity services:
//! - Password hashing (Argon2id)
//! - JWT encoding and decoding (HS256)
//! - Access token issuance with a fixed 15 minute lifetime
//!
//! Nothing here knows about identity storage; services own their domain and
//! adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{IdentityClaims, TokenIssuer};
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let token = issuer.issue(IdentityClaims::new(1, "alice@example.com")).unwrap();
//! let claims = issuer.verify(&token.access_token).unwrap();
//! assert_eq!(claims.sub, 1);
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

pub use issuer::AccessToken;
pub use issuer::TokenIssuer;
pub use issuer::ACCESS_TOKEN_TTL_MINUTES;
pub use jwt::Claims;
pub use jwt::IdentityClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
