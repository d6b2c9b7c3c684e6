use std::collections::BTreeSet;

use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::TokenError;
use super::secret::SecretKey;

/// Token type literal returned with every issued token.
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Builds and signs session tokens for authenticated identities.
///
/// Holds the encoding half of the shared secret plus the issuance policy
/// (TTL and issuer string). Signing uses HS256; the three-segment compact
/// form is `base64url(header).base64url(payload).base64url(signature)`.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
    ttl_ms: i64,
    issuer: String,
}

/// A signed token plus its presentation type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT string
    pub access_token: String,
    /// Always `"Bearer"`
    pub token_type: &'static str,
}

impl TokenIssuer {
    /// Create an issuer from the shared secret and issuance policy.
    ///
    /// # Arguments
    /// * `secret` - Validated symmetric key (HS256)
    /// * `ttl_ms` - Token lifetime in milliseconds
    /// * `issuer` - Value of the `iss` claim
    pub fn new(secret: &SecretKey, ttl_ms: i64, issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
            ttl_ms,
            issuer: issuer.into(),
        }
    }

    /// Issue a signed token for an authenticated subject.
    ///
    /// Claims carry `sub`, `iss`, `iat = now`, `exp = now + TTL`, and the
    /// role set in sorted order.
    ///
    /// # Errors
    /// * `Encoding` - Serialization or signing failed (not expected under
    ///   normal operation; the key is validated at startup)
    pub fn issue(&self, subject: &str, roles: &BTreeSet<String>) -> Result<IssuedToken, TokenError> {
        let claims = Claims::new(subject, self.issuer.as_str(), roles.clone(), self.ttl_ms);

        let access_token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE_BEARER,
        })
    }
}
