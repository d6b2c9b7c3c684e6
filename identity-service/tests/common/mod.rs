use std::sync::Arc;
use std::sync::Mutex;
use std::sync::Once;

use async_trait::async_trait;
use auth::Authenticator;
use auth::SecretKey;
use identity_service::identity::errors::DirectoryError;
use identity_service::identity::models::Identity;
use identity_service::identity::ports::IdentityDirectory;
use identity_service::identity::service::IdentityService;

/// In-memory directory enforcing the same uniqueness constraints a real
/// store would, including rejecting a racy duplicate at save time.
pub struct InMemoryDirectory {
    identities: Mutex<Vec<Identity>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<Identity>, DirectoryError> {
        let identities = self.identities.lock().unwrap();
        Ok(identities
            .iter()
            .find(|i| i.username.as_str() == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DirectoryError> {
        let identities = self.identities.lock().unwrap();
        Ok(identities
            .iter()
            .find(|i| i.email.as_str() == email)
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DirectoryError> {
        let identities = self.identities.lock().unwrap();
        Ok(identities.iter().any(|i| i.username.as_str() == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DirectoryError> {
        let identities = self.identities.lock().unwrap();
        Ok(identities.iter().any(|i| i.email.as_str() == email))
    }

    async fn save(&self, identity: Identity) -> Result<Identity, DirectoryError> {
        let mut identities = self.identities.lock().unwrap();

        if identities
            .iter()
            .any(|i| i.username == identity.username)
        {
            return Err(DirectoryError::UniqueViolation(
                "identities_username_key".to_string(),
            ));
        }
        if identities.iter().any(|i| i.email == identity.email) {
            return Err(DirectoryError::UniqueViolation(
                "identities_email_key".to_string(),
            ));
        }

        identities.push(identity.clone());
        Ok(identity)
    }
}

pub const TEST_TTL_MS: i64 = 3_600_000;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "identity_service=debug".into()),
            )
            .with_test_writer()
            .init();
    });
}

pub fn test_authenticator(ttl_ms: i64) -> Arc<Authenticator> {
    let key = SecretKey::from_bytes(b"integration_test_secret_32_bytes!!").unwrap();
    Arc::new(Authenticator::new(&key, ttl_ms, "self"))
}

pub fn test_service(ttl_ms: i64) -> (IdentityService<InMemoryDirectory>, Arc<Authenticator>) {
    init_tracing();
    let authenticator = test_authenticator(ttl_ms);
    let service = IdentityService::new(Arc::new(InMemoryDirectory::new()), authenticator.clone());
    (service, authenticator)
}
