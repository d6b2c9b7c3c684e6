//! Authentication primitives library
//!
//! Provides the building blocks of stateless, token-based authentication:
//! - Password hashing (Argon2id) with constant-time verification
//! - Signed session tokens (JWT, HS256) with millisecond expiry
//! - A coordinator combining both for credential flows
//!
//! The service crate defines the identity domain and persistence ports and
//! composes these primitives. Nothing here performs I/O or holds mutable
//! state; every type is safe to share across request handlers.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::collections::BTreeSet;
//!
//! use auth::{SecretKey, TokenIssuer, TokenValidator};
//!
//! let key = SecretKey::from_bytes(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let issuer = TokenIssuer::new(&key, 3_600_000, "self");
//! let validator = TokenValidator::new(&key);
//!
//! let roles = BTreeSet::from(["ROLE_USER".to_string()]);
//! let issued = issuer.issue("alice", &roles).unwrap();
//! assert_eq!(issued.token_type, "Bearer");
//!
//! let claims = validator.validate(&issued.access_token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::bearer_token;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::SecretKey;
pub use jwt::SecretKeyError;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
