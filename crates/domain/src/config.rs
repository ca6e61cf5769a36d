//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_REMOTE_TIMEOUT_SECS, DEFAULT_SESSION_PATH,
};
use crate::errors::{CarbonError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound for one remote calculation, retries included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Attempts for idempotent requests (initial try + retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// When false, every calculation is local
    #[serde(default = "default_true")]
    pub remote_enabled: bool,
}

/// Session persistence configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

fn default_true() -> bool {
    true
}

fn default_session_path() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_PATH)
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            remote_enabled: true,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { path: default_session_path() }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Reject values the rest of the application cannot work with.
    ///
    /// # Errors
    /// Returns `CarbonError::Config` for a base URL that is not an absolute
    /// http(s) URL, a zero timeout, or zero attempts.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            CarbonError::Config(format!("Invalid API base URL '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CarbonError::Config(format!(
                "API base URL must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(CarbonError::Config("API timeout must be at least 1 second".into()));
        }
        if self.api.max_attempts == 0 {
            return Err(CarbonError::Config("API max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}
