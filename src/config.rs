//! Client configuration.
//!
//! Use the builder pattern to customize the client:
//!
//! ```ignore
//! use splox::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::new()
//!     .with_api_key("sk-...")
//!     .with_timeout(Duration::from_secs(10));
//! ```

use std::time::Duration;

use url::Url;

use crate::error::{SploxError, SploxResult};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://app.splox.io/api/v1";

/// Default timeout for buffered requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default execution-tree polling interval for `run_and_wait` fallback.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "SPLOX_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "SPLOX_BASE_URL";

/// Configuration for [`SploxClient`](crate::SploxClient) and the blocking client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Bearer token sent on every request (webhook events work without one)
    pub api_key: Option<String>,
    /// API root, e.g. `https://app.splox.io/api/v1`
    pub base_url: String,
    /// Timeout for buffered requests; streams are never timed out
    pub timeout: Duration,
    /// Interval between execution-tree polls when a listen stream ends early
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl ClientConfig {
    /// Create a config with default values and no API key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus `SPLOX_API_KEY` and `SPLOX_BASE_URL` when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(key) = non_empty_env(API_KEY_ENV) {
            config.api_key = Some(key);
        }
        if let Some(url) = non_empty_env(BASE_URL_ENV) {
            config.base_url = url;
        }
        config
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `run_and_wait` polling interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Base URL without trailing slashes.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check the config before a client is built from it.
    pub fn validate(&self) -> SploxResult<()> {
        validate_base_url(&self.base_url)?;
        if self.timeout.is_zero() {
            return Err(SploxError::config("timeout must be greater than zero"));
        }
        if self.poll_interval.is_zero() {
            return Err(SploxError::config("poll interval must be greater than zero"));
        }
        if matches!(self.api_key.as_deref(), Some(key) if key.trim().is_empty()) {
            return Err(SploxError::config("api key is empty"));
        }
        Ok(())
    }
}

/// Require a well-formed absolute `http://` or `https://` URL with a host
/// and no embedded credentials.
pub(crate) fn validate_base_url(base_url: &str) -> SploxResult<()> {
    let url = Url::parse(base_url)
        .map_err(|e| SploxError::config(format!("invalid base url {base_url:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SploxError::config(format!(
            "base url must use http or https: {base_url:?}"
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(SploxError::config(format!("base url has no host: {base_url:?}")));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(SploxError::config(format!(
            "base url must not contain credentials: {base_url:?}"
        )));
    }
    Ok(())
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
