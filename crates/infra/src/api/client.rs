//! REST client for the Carbonwise API
//!
//! Joins paths onto the configured base URL, attaches the bearer token from
//! an [`AccessTokenProvider`], and maps HTTP statuses onto [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use carbonwise_core::AccessTokenProvider;
use carbonwise_domain::constants::{DEFAULT_API_BASE_URL, DEFAULT_MAX_ATTEMPTS};
use carbonwise_domain::ApiConfig;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Timeout for the unauthenticated health probe
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the API lives and how long to wait for it
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "http://localhost:8000/api")
    pub base_url: String,
    /// Timeout for a single request, retries included
    pub timeout: Duration,
    /// Attempts for idempotent requests
    pub max_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            max_attempts: config.max_attempts,
        }
    }
}

/// Bearer-authenticated JSON client
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Build a client over a fresh [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HttpClient cannot be created
    pub fn new(
        config: ApiClientConfig,
        auth: Option<Arc<dyn AccessTokenProvider>>,
    ) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .build()
            .map_err(|e| ApiError::Config(format!("HTTP client setup failed: {e}")))?;

        Ok(Self { http_client: Arc::new(http_client), auth, config })
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Execute an authenticated GET request
    ///
    /// # Errors
    ///
    /// Returns error if no token is available, the request fails, or the
    /// response cannot be deserialized
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, None, true).await?;
        let result = Self::decode(response).await?;
        debug!(path = %path, "GET ok");
        Ok(result)
    }

    /// Execute an authenticated POST request
    ///
    /// # Errors
    ///
    /// Returns error if no token is available, the request fails, or the
    /// response cannot be deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let response = self.execute(Method::POST, path, Some(body), true).await?;
        let result = Self::decode(response).await?;
        debug!(path = %path, "POST ok");
        Ok(result)
    }

    /// Execute a POST request without a bearer token (login, sign-up)
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be
    /// deserialized
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_public<T: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let response = self.execute(Method::POST, path, Some(body), false).await?;
        let result = Self::decode(response).await?;
        debug!(path = %path, "POST ok");
        Ok(result)
    }

    /// Probe `GET /health` without a token.
    ///
    /// A non-success status is reported as `Ok(false)`; only an unreachable
    /// server or the probe timeout is an error.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let request = self.http_client.request(Method::GET, self.url("/health"));
        let response = tokio::time::timeout(HEALTH_CHECK_TIMEOUT, self.http_client.send(request))
            .await
            .map_err(|_| ApiError::Timeout(HEALTH_CHECK_TIMEOUT))?
            .map_err(ApiError::from)?;

        let healthy = response.status().is_success();
        if healthy {
            debug!("API is up");
        } else {
            warn!(status = %response.status(), "API health probe failed");
        }
        Ok(healthy)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn encode<T: Serialize>(body: &T) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {}", e)))
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        authenticated: bool,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!(url = %url, %method, "API request");

        let mut request = self
            .http_client
            .request(method, &url)
            .header(reqwest::header::ACCEPT, "application/json");

        if authenticated {
            let auth = self
                .auth
                .as_ref()
                .ok_or_else(|| ApiError::Auth("No session available for this request".into()))?;
            let token = auth.access_token().await?;
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let timeout = self.config.timeout;
        let response = match tokio::time::timeout(timeout, self.http_client.send(request)).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => return Err(ApiError::Timeout(timeout)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Self::map_status_error(status, &url, &body);
            warn!(
                url = %url,
                %status,
                category = ?err.category(),
                retryable = err.should_retry(),
                "API call rejected"
            );
            return Err(err);
        }

        Ok(response)
    }

    async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
        let status = response.status();

        // 204 and 205 carry no body
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "{} response has no body to decode",
                    status.as_u16()
                ))
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn map_status_error(status: StatusCode, url: &str, body: &str) -> ApiError {
        let message = match error_detail(body) {
            Some(detail) => format!("{} returned status {}: {}", url, status, detail),
            None => format!("{} returned status {}", url, status),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimit(message),
            s if s.is_server_error() => ApiError::Server(message),
            s if s.is_client_error() => ApiError::Client(message),
            _ => ApiError::Network(message),
        }
    }
}

/// Pull the human-readable part out of an error body.
///
/// The API answers errors with `{"detail": "..."}`, or a list of field
/// problems for validation failures. Anything else is passed through.
fn error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(serde_json::Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| {
                        item.get("msg").and_then(|m| m.as_str()).map_or_else(
                            || item.to_string(),
                            str::to_string,
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Some(other) => Some(other.to_string()),
            None => Some(body.to_string()),
        },
        _ => Some(body.to_string()),
    }
}

/// Fluent construction of [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the bearer-token source
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        ApiClient::new(self.config.unwrap_or_default(), self.auth)
    }
}
