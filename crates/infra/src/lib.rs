//! # Carbonwise Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with bounded retries
//! - REST API client and adapters for the calculator and auth endpoints
//! - File-backed session store
//! - Configuration loading from the environment and config files
//!
//! ## Architecture
//! - Implements traits defined in `carbonwise-core`
//! - Depends on `carbonwise-domain` and `carbonwise-core`
//! - Contains all "impure" code (network and file I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod session;

// Re-export commonly used items
pub use api::{ApiAuthGateway, ApiClient, ApiClientConfig, ApiError, ApiRemoteCalculator};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use session::FileSessionStore;
