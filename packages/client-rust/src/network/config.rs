//! Configuration of the stand-in grade API server.

use std::time::Duration;

/// Key accepted by a default-configured server.
pub const DEV_API_KEY: &str = "dev-key";

/// Path prefix the grade endpoints are mounted under, mirroring the hosted API.
pub const API_PREFIX: &str = "/sgt";

/// Top-level network configuration for the server.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address for the server.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Credentials accepted on every request.
    pub api_keys: Vec<String>,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    /// Maximum time to wait for a request to complete.
    pub request_timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            api_keys: vec![DEV_API_KEY.to_string()],
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl NetworkConfig {
    /// Returns `true` if `key` is one of the configured credentials.
    #[must_use]
    pub fn accepts(&self, key: &str) -> bool {
        self.api_keys.iter().any(|k| k == key)
    }
}
