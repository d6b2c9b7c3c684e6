use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedToken;
use chrono::Utc;

use crate::identity::errors::IdentityError;
use crate::identity::models::AuthenticatedIdentity;
use crate::identity::models::Credentials;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::RegisterIdentityCommand;
use crate::identity::models::RoleSet;
use crate::identity::ports::IdentityDirectory;
use crate::identity::ports::IdentityServicePort;

/// Domain service implementing registration and credential authentication.
///
/// Login resolution order is fixed: the identifier is tried as an email
/// first, then as a username. Internally a failed login is one of three
/// reasons (unknown identifier, password mismatch, disabled account); all
/// three leave this service as the single opaque
/// [`IdentityError::AuthenticationFailed`], with the real reason kept only
/// in debug-level logs.
pub struct IdentityService<D>
where
    D: IdentityDirectory,
{
    directory: Arc<D>,
    authenticator: Arc<Authenticator>,
}

impl<D> IdentityService<D>
where
    D: IdentityDirectory,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `directory` - Identity persistence implementation
    /// * `authenticator` - Configured hashing and token primitives
    pub fn new(directory: Arc<D>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory,
            authenticator,
        }
    }

    /// Resolve a login identifier to a stored identity, email-first.
    async fn resolve_identifier(&self, login: &str) -> Result<Option<Identity>, IdentityError> {
        if let Some(identity) = self.directory.find_by_email(login).await? {
            return Ok(Some(identity));
        }
        Ok(self.directory.find_by_username(login).await?)
    }
}

#[async_trait]
impl<D> IdentityServicePort for IdentityService<D>
where
    D: IdentityDirectory,
{
    async fn register(&self, command: RegisterIdentityCommand) -> Result<(), IdentityError> {
        // Both checks run before any write; the combined error never says
        // which identifier collided
        let username_taken = self
            .directory
            .exists_by_username(command.username.as_str())
            .await?;
        let email_taken = self
            .directory
            .exists_by_email(command.email.as_str())
            .await?;

        if username_taken || email_taken {
            tracing::debug!(
                username = %command.username,
                username_taken,
                email_taken,
                "registration rejected: identifier already in use"
            );
            return Err(IdentityError::DuplicateIdentity);
        }

        let roles = RoleSet::from_registration(command.roles);
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let identity = Identity {
            id: IdentityId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            roles,
            enabled: true,
            created_at: Utc::now(),
        };

        // The existence checks race with concurrent registrations; a
        // uniqueness violation here still maps to DuplicateIdentity
        let saved = self.directory.save(identity).await?;

        tracing::info!(
            identity_id = %saved.id,
            username = %saved.username,
            "identity registered"
        );

        Ok(())
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, IdentityError> {
        let Some(identity) = self.resolve_identifier(&credentials.login).await? else {
            tracing::debug!("login rejected: unknown identifier");
            return Err(IdentityError::AuthenticationFailed);
        };

        if !self
            .authenticator
            .verify_password(&credentials.password, &identity.password_hash)
        {
            tracing::debug!(username = %identity.username, "login rejected: password mismatch");
            return Err(IdentityError::AuthenticationFailed);
        }

        if !identity.enabled {
            tracing::debug!(username = %identity.username, "login rejected: account disabled");
            return Err(IdentityError::AuthenticationFailed);
        }

        let authenticated = AuthenticatedIdentity::from(&identity);
        let issued = self
            .authenticator
            .issue_token(authenticated.subject(), authenticated.roles.as_set())?;

        tracing::info!(username = %authenticated.username, "login succeeded");

        Ok(issued)
    }
}
