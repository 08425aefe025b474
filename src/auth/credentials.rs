//! Credential management for Coinbase API authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "COINBASE_API_KEY";
/// Default environment variable holding the base64 API secret.
pub const API_SECRET_VAR: &str = "COINBASE_API_SECRET";
/// Default environment variable holding the API passphrase.
pub const API_PASSPHRASE_VAR: &str = "COINBASE_API_PASSPHRASE";

/// API credentials: key, passphrase and the base64-encoded signing secret.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier)
    pub api_key: String,
    /// Passphrase chosen when the key was created
    passphrase: SecretString,
    /// The API secret (private, used for signing only)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key, base64 secret and passphrase.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            passphrase: SecretString::from(passphrase.into()),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }

    /// Get the passphrase sent in the `cb-access-passphrase` header.
    pub fn expose_passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("passphrase", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(api_key, api_secret, passphrase),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads `COINBASE_API_KEY`, `COINBASE_API_SECRET` and
/// `COINBASE_API_PASSPHRASE`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if any of the variables is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(API_KEY_VAR, API_SECRET_VAR, API_PASSPHRASE_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if any of the variables is not set.
    pub fn try_from_env_vars(key_var: &str, secret_var: &str, passphrase_var: &str) -> Option<Self> {
        let api_key = std::env::var(key_var).ok()?;
        let api_secret = std::env::var(secret_var).ok()?;
        let passphrase = std::env::var(passphrase_var).ok()?;

        Some(Self {
            credentials: Credentials::new(api_key, api_secret, passphrase),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_key", "c3VwZXJfc2VjcmV0", "hunter2");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("c3VwZXJfc2VjcmV0"));
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("key", "secret", "phrase");
        let creds = provider.get_credentials();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.expose_secret(), "secret");
        assert_eq!(creds.expose_passphrase(), "phrase");
    }

    #[test]
    fn test_env_credentials_missing_vars() {
        let provider = EnvCredentials::try_from_env_vars(
            "COINBASE_TEST_UNSET_KEY",
            "COINBASE_TEST_UNSET_SECRET",
            "COINBASE_TEST_UNSET_PASSPHRASE",
        );
        assert!(provider.is_none());
    }
}
