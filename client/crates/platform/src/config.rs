//! Client Configuration
//!
//! Network and persistence settings shared by every feature crate.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names
pub const ENV_BASE_URL: &str = "LIONHEART_BASE_URL";
pub const ENV_TOKEN_PATH: &str = "LIONHEART_TOKEN_PATH";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "LIONHEART_REQUEST_TIMEOUT_SECS";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Where the token key-value file lives
    pub token_path: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.lionheart.example".to_string(),
            token_path: PathBuf::from("lionheart/token.json"),
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("lionheart-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Config for a locally running backend
    pub fn development() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            token_path: PathBuf::from("target/dev-token.json"),
            ..Default::default()
        }
    }

    /// Read overrides from the environment, falling back to `Default`
    ///
    /// Unparseable timeouts are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Ok(path) = env::var(ENV_TOKEN_PATH) {
            config.token_path = PathBuf::from(path);
        }
        if let Ok(raw) = env::var(ENV_REQUEST_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) => config.request_timeout = Duration::from_secs(secs),
                Err(e) => tracing::warn!(value = %raw, error = %e, "Ignoring invalid request timeout"),
            }
        }

        config
    }
}
