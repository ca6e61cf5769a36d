//! Port interfaces for session persistence and authentication
//!
//! These traits define the boundaries between the session context and the
//! infrastructure that stores sessions and talks to the auth endpoints.

use async_trait::async_trait;
use carbonwise_domain::{BusinessRegistration, Credentials, Result, Session, TokenGrant};

/// Trait for persisting the signed-in session between runs
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, `None` when signed out
    async fn load(&self) -> Result<Option<Session>>;

    /// Persist a session, replacing any previous one
    async fn save(&self, session: &Session) -> Result<()>;

    /// Remove the persisted session. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}

/// Trait for the remote login and sign-up endpoints
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for an access token
    async fn login(&self, credentials: &Credentials) -> Result<TokenGrant>;

    /// Create a business account and sign it in
    async fn register(&self, registration: &BusinessRegistration) -> Result<TokenGrant>;
}

/// Source of bearer tokens for authenticated API calls
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current bearer token, or `CarbonError::Auth` when signed out
    async fn access_token(&self) -> Result<String>;

    /// Drop the current token after the server rejected it
    async fn invalidate(&self) -> Result<()>;
}
