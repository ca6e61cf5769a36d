//! API-specific error types
//!
//! Failures of a single API call, before they are folded into `CarbonError`.

use std::time::Duration;

use carbonwise_domain::CarbonError;
use thiserror::Error;

/// Coarse grouping of [`ApiError`] used to decide whether a call is worth
/// repeating later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401/403; the user has to sign in again
    Authentication,
    /// 429
    RateLimit,
    /// 5xx
    Server,
    /// Any other 4xx
    Client,
    /// Connection failures and timeouts
    Network,
    /// Local misconfiguration
    Config,
    /// Body did not match the expected shape
    Decode,
}

/// API operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
            Self::Decode(_) => ApiErrorCategory::Decode,
        }
    }

    /// Transient failures only. An expired session never is.
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }
}

impl From<ApiError> for CarbonError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => CarbonError::Auth(message),
            ApiError::Client(message) => CarbonError::InvalidInput(message),
            ApiError::Config(message) => CarbonError::Config(message),
            ApiError::Decode(message) => {
                CarbonError::Internal(format!("Failed to decode response: {message}"))
            }
            ApiError::Timeout(after) => {
                CarbonError::Network(format!("Request timed out after {after:?}"))
            }
            ApiError::RateLimit(message) => {
                CarbonError::Network(format!("Rate limit exceeded: {message}"))
            }
            ApiError::Server(message) | ApiError::Network(message) => CarbonError::Network(message),
        }
    }
}

/// Map domain errors raised below the API layer (transport, token lookup).
impl From<CarbonError> for ApiError {
    fn from(err: CarbonError) -> Self {
        match err {
            CarbonError::Auth(message) => Self::Auth(message),
            CarbonError::Network(message) => Self::Network(message),
            CarbonError::Config(message) => Self::Config(message),
            CarbonError::NotFound(message) | CarbonError::InvalidInput(message) => {
                Self::Client(message)
            }
            CarbonError::Storage(message) | CarbonError::Internal(message) => {
                Self::Server(message)
            }
        }
    }
}
