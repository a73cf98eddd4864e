//! Client configuration for talking to the remote grade API.

use std::time::Duration;

use clap::Args;
use roster_core::reconciler::DEFAULT_REQUEST_TIMEOUT;

/// Base URL of the hosted grade API.
pub const DEFAULT_BASE_URL: &str = "https://s-apis.learningfuze.com/sgt";

/// Settings shared by every gateway exchange.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    /// Credential sent with every request.
    pub api_key: String,
    /// Maximum time to wait for one exchange to complete.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Problems that prevent a gateway from being built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("api key must not be empty")]
    MissingApiKey,
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ClientConfig {
    /// Checks that the configuration can be used to build a gateway.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        Ok(())
    }

    /// Full URL of an endpoint path such as `"create"`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Command-line and environment settings for the API connection.
#[derive(Debug, Clone, Args)]
pub struct ClientArgs {
    /// Base URL of the grade API.
    #[arg(long, env = "ROSTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API key sent with every request.
    #[arg(long, env = "ROSTER_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Seconds to wait for each request before giving up.
    #[arg(long, env = "ROSTER_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl From<ClientArgs> for ClientConfig {
    fn from(args: ClientArgs) -> Self {
        Self {
            base_url: args.base_url,
            api_key: args.api_key,
            request_timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}
