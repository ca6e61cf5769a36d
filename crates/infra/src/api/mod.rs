//! REST API client for the Carbonwise backend
//!
//! # Architecture
//!
//! - Uses the retrying [`crate::http::HttpClient`] (no direct reqwest)
//! - Bearer tokens come from the core `AccessTokenProvider` port
//! - Adapters implement the core `RemoteCalculator` and `AuthGateway` ports
//! - Every call is bounded by the configured timeout

pub mod auth;
pub mod calculator;
pub mod client;
pub mod errors;

pub use auth::ApiAuthGateway;
pub use calculator::ApiRemoteCalculator;
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
