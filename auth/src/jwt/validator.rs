use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use super::secret::SecretKey;

/// Literal prefix of a bearer Authorization header value.
const BEARER_PREFIX: &str = "Bearer ";

/// Parses and verifies presented session tokens.
///
/// Checks run in order: compact structure, HMAC signature, expiry. The
/// signature covers header and payload, so any mutated byte in either
/// segment fails the signature check before the payload is even parsed.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a validator sharing the issuer's secret.
    pub fn new(secret: &SecretKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is in milliseconds; the library's built-in check assumes
        // seconds, so expiry is enforced manually in validate()
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a presented token and extract its claims.
    ///
    /// # Errors
    /// * `Malformed` - Not a three-segment compact token, or payload does
    ///   not decode to the expected claims
    /// * `InvalidSignature` - HMAC over header+payload does not match
    /// * `Expired` - `now >= exp` (inclusive boundary)
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp_millis()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

/// Extract the token from a raw Authorization header value.
///
/// Returns the remainder after a literal `"Bearer "` prefix; anything else
/// (missing prefix, wrong case, no space) means no token was supplied.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix(BEARER_PREFIX)
}
