use thiserror::Error;

/// Error type for password operations.
///
/// Verification has no error variant: a malformed or mismatching hash
/// verifies as `false` rather than failing.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
