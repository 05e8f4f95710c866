use serde::Deserialize;
use std::time::Duration;

use crate::client::RetryPolicy;

/// Metadata client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// TMDB v3 API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Attempts per movie before giving up
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,

    /// Base backoff; attempt `n` waits `backoff * 2^n`
    #[serde(default = "default_fetch_backoff_ms")]
    pub fetch_backoff_ms: u64,

    /// Timeout for a single HTTP attempt
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_fetch_retries() -> u32 {
    3
}

fn default_fetch_backoff_ms() -> u64 {
    1000
}

fn default_fetch_timeout_secs() -> u64 {
    5
}

impl ClientConfig {
    /// Config with the given key and every other field at its default
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            tmdb_api_key: api_key.into(),
            tmdb_api_url: default_tmdb_api_url(),
            fetch_retries: default_fetch_retries(),
            fetch_backoff_ms: default_fetch_backoff_ms(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<ClientConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load metadata client config: {}", e))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.fetch_retries,
            Duration::from_millis(self.fetch_backoff_ms),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
