use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encoding(String),

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

/// Error type for secret key material.
///
/// Raised once at startup when configuration is loaded; token operations
/// never see an invalid key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretKeyError {
    #[error("Secret is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("Secret too short: minimum {min} bytes required for HS256, got {actual}")]
    TooShort { min: usize, actual: usize },
}
