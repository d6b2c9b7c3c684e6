use thiserror::Error;

/// Error for IdentityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),

    #[error("Email too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for RoleSet construction failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleSetError {
    #[error("Role set must not be empty")]
    Empty,
}

/// Error surfaced by Directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// A storage-level uniqueness constraint rejected a write. The message
    /// names the constraint, not the conflicting value.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Top-level error for identity operations.
///
/// `AuthenticationFailed` is deliberately opaque: unknown identifier, wrong
/// password, and disabled account all collapse into it so the boundary
/// cannot be used to enumerate accounts. `DuplicateIdentity` likewise never
/// says whether the username or the email collided.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Username or email is already in use")]
    DuplicateIdentity,

    #[error("Authentication failed")]
    AuthenticationFailed,

    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid identity ID: {0}")]
    InvalidIdentityId(#[from] IdentityIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role set: {0}")]
    InvalidRoles(#[from] RoleSetError),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    #[error("Directory error: {0}")]
    Directory(DirectoryError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<DirectoryError> for IdentityError {
    fn from(err: DirectoryError) -> Self {
        match err {
            // The pre-write existence checks race with concurrent
            // registrations; the storage constraint is authoritative and a
            // late violation is still a duplicate, not an internal error.
            DirectoryError::UniqueViolation(_) => IdentityError::DuplicateIdentity,
            other => IdentityError::Directory(other),
        }
    }
}

impl From<anyhow::Error> for IdentityError {
    fn from(err: anyhow::Error) -> Self {
        IdentityError::Unknown(err.to_string())
    }
}
