use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::errors::SecretKeyError;

/// Symmetric signing key shared by the token issuer and validator.
///
/// Loaded once at startup and immutable for the process lifetime. The key
/// bytes are deliberately excluded from `Debug` output so they can never
/// leak through logs or error messages.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Minimum key length for HS256: 256 bits.
    pub const MIN_BYTES: usize = 32;

    /// Decode a key from its base64 configuration form.
    ///
    /// # Errors
    /// * `InvalidEncoding` - Value is not valid base64
    /// * `TooShort` - Decoded key is under 256 bits
    pub fn from_base64(encoded: &str) -> Result<Self, SecretKeyError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| SecretKeyError::InvalidEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Build a key from raw bytes.
    ///
    /// # Errors
    /// * `TooShort` - Key is under 256 bits
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SecretKeyError> {
        if bytes.len() < Self::MIN_BYTES {
            return Err(SecretKeyError::TooShort {
                min: Self::MIN_BYTES,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base64_round_trip() {
        let raw = [7u8; 32];
        let encoded = STANDARD.encode(raw);

        let key = SecretKey::from_base64(&encoded).expect("Failed to decode key");
        assert_eq!(key.as_bytes(), raw);
    }

    #[test]
    fn test_from_base64_rejects_invalid_encoding() {
        let result = SecretKey::from_base64("not base64!!!");
        assert!(matches!(result, Err(SecretKeyError::InvalidEncoding(_))));
    }

    #[test]
    fn test_rejects_short_key() {
        let encoded = STANDARD.encode([1u8; 16]);
        let result = SecretKey::from_base64(&encoded);
        assert_eq!(
            result,
            Err(SecretKeyError::TooShort {
                min: 32,
                actual: 16
            })
        );

        assert!(SecretKey::from_bytes(&[1u8; 31]).is_err());
        assert!(SecretKey::from_bytes(&[1u8; 32]).is_ok());
    }

    #[test]
    fn test_debug_does_not_leak_key_bytes() {
        let key = SecretKey::from_bytes(&[0x41u8; 32]).unwrap();
        let output = format!("{:?}", key);
        assert_eq!(output, "SecretKey(<redacted>)");
    }
}
