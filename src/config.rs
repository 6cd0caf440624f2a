//! Client configuration
//!
//! Configuration is resolved once, when a [`ClientConfig`] is built, and then
//! handed to the client. Environment variables are only consulted by
//! [`ClientConfig::from_env`]; nothing reads them at call time.

use crate::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.convertkit.com";

/// Default number of page requests allowed in flight at once
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 8;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the endpoint
pub const ENV_ENDPOINT: &str = "CONVERTKIT_API_ENDPOINT";
/// Environment variable holding the API key
pub const ENV_KEY: &str = "CONVERTKIT_API_KEY";
/// Environment variable holding the API secret
pub const ENV_SECRET: &str = "CONVERTKIT_API_SECRET";
/// Environment variable holding the concurrency limit
pub const ENV_CONCURRENT_REQUESTS: &str = "CONVERTKIT_CONCURRENT_REQUESTS";

/// Configuration for [`crate::Client`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API
    pub endpoint: String,
    /// Public API key, used by write operations
    pub key: Option<String>,
    /// API secret, used by subscriber reads
    pub secret: Option<String>,
    /// Maximum simultaneous page requests when listing subscribers
    pub concurrent_requests: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            key: None,
            secret: None,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("convertkit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Defaults overlaid with the `CONVERTKIT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from `lookup`; empty values are ignored
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let mut builder = Self::builder();
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            builder = builder.endpoint(endpoint);
        }
        if let Some(key) = get(ENV_KEY) {
            builder = builder.key(key);
        }
        if let Some(secret) = get(ENV_SECRET) {
            builder = builder.secret(secret);
        }
        if let Some(raw) = get(ENV_CONCURRENT_REQUESTS) {
            let limit = raw
                .parse::<usize>()
                .map_err(|e| Error::invalid_value(ENV_CONCURRENT_REQUESTS, e.to_string()))?;
            builder = builder.concurrent_requests(limit);
        }
        builder.build()
    }

    /// Check that the config can be used to build a client
    pub fn validate(&self) -> Result<()> {
        if self.concurrent_requests == 0 {
            return Err(Error::invalid_value(
                "concurrent_requests",
                "must be at least 1",
            ));
        }
        Url::parse(&self.endpoint)?;
        Ok(())
    }

    /// The API secret, or [`Error::SecretMissing`]
    pub fn require_secret(&self) -> Result<&str> {
        self.secret.as_deref().ok_or(Error::SecretMissing)
    }

    /// The API key, or [`Error::KeyMissing`]
    pub fn require_key(&self) -> Result<&str> {
        self.key.as_deref().ok_or(Error::KeyMissing)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("has_key", &self.key.is_some())
            .field("has_secret", &self.secret.is_some())
            .field("concurrent_requests", &self.concurrent_requests)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the API endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the API key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.config.key = Some(key.into());
        self
    }

    /// Set the API secret
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = Some(secret.into());
        self
    }

    /// Set the page request concurrency limit
    pub fn concurrent_requests(mut self, limit: usize) -> Self {
        self.config.concurrent_requests = limit;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
