use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::EmailError;
use crate::identity::errors::IdentityIdError;
use crate::identity::errors::RoleSetError;
use crate::identity::errors::UsernameError;

/// Identity aggregate entity.
///
/// Represents a registered user of the authentication core. The password
/// field always holds an Argon2 hash after creation, never plaintext.
/// Username and email are each globally unique; the Directory's storage
/// constraints are the source of truth for that invariant.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub roles: RoleSet,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, IdentityIdError> {
        Uuid::parse_str(s)
            .map(IdentityId)
            .map_err(|e| IdentityIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-50 characters and contains only alphanumeric,
/// underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 50 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format using an RFC 5322 compliant parser and caps length at
/// 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 100;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `TooLong` - Email exceeds 100 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: email.len(),
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty set of role names with deterministic (sorted) order.
///
/// Sorted order keeps the roles claim byte-stable across issuances for the
/// same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    /// Baseline role assigned when a registration supplies no roles.
    pub const DEFAULT_ROLE: &'static str = "ROLE_USER";

    /// Create a role set from role names.
    ///
    /// # Errors
    /// * `Empty` - No roles supplied
    pub fn new(roles: impl IntoIterator<Item = String>) -> Result<Self, RoleSetError> {
        let set: BTreeSet<String> = roles.into_iter().collect();
        if set.is_empty() {
            Err(RoleSetError::Empty)
        } else {
            Ok(Self(set))
        }
    }

    /// The single-role baseline set.
    pub fn baseline() -> Self {
        Self(BTreeSet::from([Self::DEFAULT_ROLE.to_string()]))
    }

    /// Build the role set for a registration: caller-supplied roles are
    /// accepted only if non-empty, otherwise the baseline applies.
    pub fn from_registration(roles: Vec<String>) -> Self {
        Self::new(roles).unwrap_or_else(|_| Self::baseline())
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    /// Sorted view of the role names.
    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.0
    }
}

/// One authentication attempt: a login identifier (username or email) plus
/// the plaintext password.
///
/// Request-scoped; never persisted. `Debug` redacts the password so the
/// struct cannot leak secrets through logging.
#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of successful credential verification, consumed by token issuance.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub id: IdentityId,
    pub username: Username,
    pub roles: RoleSet,
    pub enabled: bool,
}

impl AuthenticatedIdentity {
    /// The token subject claim for this identity: the username.
    pub fn subject(&self) -> &str {
        self.username.as_str()
    }
}

impl From<&Identity> for AuthenticatedIdentity {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            roles: identity.roles.clone(),
            enabled: identity.enabled,
        }
    }
}

/// Command to register a new identity with validated value objects.
///
/// `roles` may be empty; the service substitutes the baseline role.
#[derive(Debug)]
pub struct RegisterIdentityCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub roles: Vec<String>,
}

impl RegisterIdentityCommand {
    /// Construct a registration command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password` - Plain text password (hashed by the service)
    /// * `roles` - Requested roles, empty for the baseline
    pub fn new(
        username: Username,
        email: EmailAddress,
        password: String,
        roles: Vec<String>,
    ) -> Self {
        Self {
            username,
            email,
            password,
            roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(matches!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(Username::new("abc".to_string()).is_ok());
        assert!(Username::new("a".repeat(50)).is_ok());
        assert!(matches!(
            Username::new("a".repeat(51)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_username_characters() {
        assert!(Username::new("alice_b-3".to_string()).is_ok());
        assert!(matches!(
            Username::new("alice b".to_string()),
            Err(UsernameError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("bob@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));

        let long_local = "a".repeat(95);
        assert!(matches!(
            EmailAddress::new(format!("{}@example.com", long_local)),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_role_set_rejects_empty() {
        assert!(matches!(RoleSet::new(vec![]), Err(RoleSetError::Empty)));
        assert!(RoleSet::new(vec!["ROLE_USER".to_string()]).is_ok());
    }

    #[test]
    fn test_role_set_registration_default() {
        let defaulted = RoleSet::from_registration(vec![]);
        assert!(defaulted.contains(RoleSet::DEFAULT_ROLE));

        let supplied = RoleSet::from_registration(vec!["ROLE_ADMIN".to_string()]);
        assert!(supplied.contains("ROLE_ADMIN"));
        assert!(!supplied.contains(RoleSet::DEFAULT_ROLE));
    }

    #[test]
    fn test_role_set_is_sorted_and_deduplicated() {
        let roles = RoleSet::new(vec![
            "ROLE_USER".to_string(),
            "ROLE_ADMIN".to_string(),
            "ROLE_USER".to_string(),
        ])
        .unwrap();

        let ordered: Vec<&String> = roles.as_set().iter().collect();
        assert_eq!(ordered, vec!["ROLE_ADMIN", "ROLE_USER"]);
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            login: "bob@example.com".to_string(),
            password: "longenough1".to_string(),
        };

        let output = format!("{:?}", credentials);
        assert!(output.contains("bob@example.com"));
        assert!(!output.contains("longenough1"));
    }
}
