//! duoauth configuration.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent product token.
const DEFAULT_USER_AGENT_PRODUCT: &str = "duoauth";

/// Target and credentials for one Duo application.
///
/// Every value here comes from the Duo Admin Panel entry of the protected
/// application. The struct can be deserialized from any serde format, so the
/// surrounding application decides where it is stored.
#[derive(Clone, Deserialize)]
pub struct DuoConfig {
    /// API hostname, e.g. `api-1234abcd.duosecurity.com` (no scheme, no path).
    pub hostname: String,

    /// Integration key, sent as the Basic-auth username.
    pub integration_key: String,

    /// Secret key used to key the request HMAC.
    /// SECURITY: Never transmitted and never printed by `Debug`.
    pub secret_key: String,

    /// Request timeout in seconds for the bundled transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent product identifier (e.g., "myapp/1.2.0").
    #[serde(default = "default_user_agent_product")]
    pub user_agent_product: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent_product() -> String {
    DEFAULT_USER_AGENT_PRODUCT.to_string()
}

impl DuoConfig {
    /// Create a configuration with default timeout and User-Agent.
    pub fn new(
        hostname: impl Into<String>,
        integration_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            integration_key: integration_key.into(),
            secret_key: secret_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent_product: default_user_agent_product(),
        }
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), crate::DuoAuthError> {
        if self.hostname.is_empty() {
            return Err(crate::DuoAuthError::ConfigError(
                "hostname cannot be empty".to_string(),
            ));
        }
        if self.hostname.contains("://") || self.hostname.contains('/') {
            return Err(crate::DuoAuthError::ConfigError(format!(
                "hostname must be a bare host name, got {}",
                self.hostname
            )));
        }
        if self.integration_key.is_empty() {
            return Err(crate::DuoAuthError::ConfigError(
                "integration_key cannot be empty".to_string(),
            ));
        }
        if self.secret_key.is_empty() {
            return Err(crate::DuoAuthError::ConfigError(
                "secret_key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for DuoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuoConfig")
            .field("hostname", &self.hostname)
            .field("integration_key", &self.integration_key)
            .field("secret_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent_product", &self.user_agent_product)
            .finish()
    }
}
