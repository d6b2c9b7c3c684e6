use async_trait::async_trait;
use auth::IssuedToken;

use crate::identity::errors::DirectoryError;
use crate::identity::errors::IdentityError;
use crate::identity::models::Credentials;
use crate::identity::models::Identity;
use crate::identity::models::RegisterIdentityCommand;

/// Port for identity service operations: the registration and login
/// boundaries exposed to transport adapters.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// Both uniqueness checks must pass before any write occurs. Supplied
    /// roles are accepted only if non-empty, otherwise the baseline role
    /// applies. The password is hashed before persistence.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Username or email is already in use (the
    ///   error does not say which)
    /// * `Password` - Hashing failed
    /// * `Directory` - Storage operation failed
    async fn register(&self, command: RegisterIdentityCommand) -> Result<(), IdentityError>;

    /// Authenticate credentials and issue a signed session token.
    ///
    /// The login identifier may be an email or a username; resolution is
    /// email-first. Unknown identifier, wrong password, and disabled
    /// account are indistinguishable to the caller.
    ///
    /// # Returns
    /// Issued token with token type `"Bearer"`
    ///
    /// # Errors
    /// * `AuthenticationFailed` - Credentials did not authenticate
    /// * `Directory` - Storage operation failed
    /// * `Token` - Token issuance failed
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, IdentityError>;
}

/// Persistence port for the identity directory (external collaborator).
///
/// Implementations own the uniqueness constraints on username and email;
/// `save` reports a violation as `UniqueViolation` even when the caller's
/// existence pre-checks passed.
#[async_trait]
pub trait IdentityDirectory: Send + Sync + 'static {
    /// Retrieve an identity by exact username.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, DirectoryError>;

    /// Retrieve an identity by exact email address.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError>;

    /// Check whether a username is already registered.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn exists_by_username(&self, username: &str) -> Result<bool, DirectoryError>;

    /// Check whether an email address is already registered.
    ///
    /// # Errors
    /// * `Storage` - Storage operation failed
    async fn exists_by_email(&self, email: &str) -> Result<bool, DirectoryError>;

    /// Persist a new identity.
    ///
    /// # Errors
    /// * `UniqueViolation` - Username or email constraint rejected the write
    /// * `Storage` - Storage operation failed
    async fn save(&self, identity: Identity) -> Result<Identity, DirectoryError>;
}
