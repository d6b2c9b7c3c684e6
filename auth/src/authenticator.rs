use std::collections::BTreeSet;

use crate::jwt::Claims;
use crate::jwt::IssuedToken;
use crate::jwt::SecretKey;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance/validation.
///
/// Constructed once at startup from the validated secret and the token
/// policy; shared read-only across request handlers. The service layer owns
/// the flow (identifier resolution, enabled checks, error collapsing) and
/// calls these primitives in order.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Validated symmetric signing key
    /// * `token_ttl_ms` - Token lifetime in milliseconds
    /// * `issuer` - Value of the `iss` claim on issued tokens
    pub fn new(secret: &SecretKey, token_ttl_ms: i64, issuer: impl Into<String>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_issuer: TokenIssuer::new(secret, token_ttl_ms, issuer),
            token_validator: TokenValidator::new(secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns `false` for any mismatch or malformed stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a signed token for an authenticated subject.
    ///
    /// # Errors
    /// * `TokenError` - Token encoding failed
    pub fn issue_token(
        &self,
        subject: &str,
        roles: &BTreeSet<String>,
    ) -> Result<IssuedToken, TokenError> {
        self.token_issuer.issue(subject, roles)
    }

    /// Validate a presented token and extract its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, forged, or expired
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_validator.validate(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_authenticator() -> Authenticator {
        let key = SecretKey::from_bytes(b"test_secret_key_at_least_32_bytes!").unwrap();
        Authenticator::new(&key, 3_600_000, "self")
    }

    fn user_roles() -> BTreeSet<String> {
        BTreeSet::from(["ROLE_USER".to_string()])
    }

    #[test]
    fn test_password_round_trip() {
        let authenticator = test_authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash));
        assert!(!authenticator.verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = test_authenticator();

        let issued = authenticator
            .issue_token("alice", &user_roles())
            .expect("Failed to issue token");
        assert_eq!(issued.token_type, "Bearer");

        let claims = authenticator
            .validate_token(&issued.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.roles, user_roles());
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = test_authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
