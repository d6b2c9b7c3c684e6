use std::env;
use std::fmt;

use auth::Authenticator;
use auth::SecretKey;
use auth::SecretKeyError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub auth: AuthConfig,
}

/// Token-signing configuration.
///
/// The secret is the base64 form of the symmetric HS256 key and must decode
/// to at least 256 bits; it is validated once at startup via
/// [`AuthConfig::authenticator`]. `Debug` redacts it.
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl_ms: i64,
    pub issuer: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl_ms", &self.token_ttl_ms)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl AuthConfig {
    /// Decode and validate the secret, then build the process-wide
    /// authenticator.
    ///
    /// # Errors
    /// * `SecretKeyError` - Secret is not base64 or is under 256 bits; this
    ///   is a fatal startup condition, not a per-request error
    pub fn authenticator(&self) -> Result<Authenticator, SecretKeyError> {
        let key = SecretKey::from_base64(&self.secret)?;
        Ok(Authenticator::new(
            &key,
            self.token_ttl_ms,
            self.issuer.clone(),
        ))
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__SECRET, AUTH__TOKEN_TTL_MS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__SECRET=... overrides auth.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    use super::*;

    fn auth_config(secret: String) -> AuthConfig {
        AuthConfig {
            secret,
            token_ttl_ms: 3_600_000,
            issuer: "self".to_string(),
        }
    }

    #[test]
    fn test_authenticator_from_valid_secret() {
        let config = auth_config(STANDARD.encode([9u8; 32]));
        assert!(config.authenticator().is_ok());
    }

    #[test]
    fn test_authenticator_rejects_weak_secret() {
        let config = auth_config(STANDARD.encode([9u8; 8]));
        assert!(matches!(
            config.authenticator(),
            Err(SecretKeyError::TooShort { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = auth_config(STANDARD.encode([9u8; 32]));
        let output = format!("{:?}", config);
        assert!(!output.contains(&config.secret));
        assert!(output.contains("<redacted>"));
    }
}
