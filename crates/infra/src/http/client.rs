use std::time::Duration;

use carbonwise_domain::CarbonError;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// When and how often a request is tried again.
///
/// Only idempotent methods are retried. A `POST` is sent exactly once
/// because the calculator endpoint stores a record per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts for an idempotent request, first try included
    pub max_attempts: usize,
    /// Delay before the first retry; doubles on each further retry
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_backoff: Duration::from_millis(200) }
    }
}

impl RetryPolicy {
    /// Attempts allowed for `method`
    pub fn attempts_for(&self, method: &Method) -> usize {
        if is_idempotent(method) {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    /// Delay before retry number `retry` (1-based), capped at 256x the base
    pub fn delay_before(&self, retry: usize) -> Duration {
        let doublings = retry.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << doublings)
    }
}

/// What one attempt produced
enum Attempt {
    Finished(Response),
    Retry,
    Failed(CarbonError),
}

/// reqwest client with a per-request timeout and a [`RetryPolicy`]
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn new() -> Result<Self, CarbonError> {
        Self::builder().build()
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Start a request on the underlying client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send a request, retrying per the policy.
    ///
    /// Any response, error statuses included, is returned to the caller once
    /// retries are exhausted; only transport failures become errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, CarbonError> {
        let request = builder.build().map_err(|err| CarbonError::from(InfraError::from(err)))?;
        let attempts = self.policy.attempts_for(request.method());

        let mut attempt = 1;
        loop {
            let pending = request.try_clone().ok_or_else(|| {
                CarbonError::Internal("request body is a stream and cannot be resent".into())
            })?;

            match self.attempt(pending, attempt < attempts).await {
                Attempt::Finished(response) => return Ok(response),
                Attempt::Failed(err) => return Err(err),
                Attempt::Retry => {
                    let delay = self.policy.delay_before(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, request: reqwest::Request, may_retry: bool) -> Attempt {
        let method = request.method().clone();
        let url = request.url().clone();

        match self.client.execute(request).await {
            Ok(response) if response.status().is_server_error() && may_retry => {
                warn!(%method, %url, status = %response.status(), "server error, retrying");
                Attempt::Retry
            }
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "HTTP response");
                Attempt::Finished(response)
            }
            Err(err) if may_retry && is_transient(&err) => {
                warn!(%method, %url, error = %err, "transport error, retrying");
                Attempt::Retry
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Attempt::Failed(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    policy: RetryPolicy,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            policy: RetryPolicy::default(),
            user_agent: concat!("carbonwise/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientBuilder {
    /// Timeout for one attempt
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.policy.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.policy.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<HttpClient, CarbonError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy()
            .build()
            .map_err(|err| CarbonError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, policy: self.policy })
    }
}

fn is_idempotent(method: &Method) -> bool {
    [Method::GET, Method::HEAD, Method::PUT, Method::DELETE, Method::OPTIONS].contains(method)
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
