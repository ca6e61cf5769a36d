//! Explicit session context

use std::sync::Arc;

use async_trait::async_trait;
use carbonwise_domain::{
    BusinessIdentity, BusinessRegistration, CarbonError, Credentials, Result, Session, TokenGrant,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::ports::{AccessTokenProvider, AuthGateway, SessionStore};

/// Holds the current session and keeps its store in step
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Session>>,
}

impl SessionContext {
    /// Create a signed-out context. Call [`SessionContext::load`] to pick up
    /// a persisted session.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store, current: RwLock::new(None) }
    }

    /// Read the persisted session into memory.
    ///
    /// A record that cannot be read, or that is missing its token or
    /// business id, leaves the context signed out.
    pub async fn load(&self) -> Option<BusinessIdentity> {
        let loaded = match self.store.load().await {
            Ok(Some(session)) if session.is_complete() => Some(session),
            Ok(Some(_)) => {
                warn!("Ignoring incomplete persisted session");
                None
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "Failed to load persisted session; continuing signed out");
                None
            }
        };

        let business = loaded.as_ref().map(|s| s.business.clone());
        *self.current.write().await = loaded;
        business
    }

    /// Persist `session` and make it current.
    pub async fn save(&self, session: Session) -> Result<()> {
        self.store.save(&session).await?;
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Forget the current session in memory and in the store.
    pub async fn clear(&self) -> Result<()> {
        self.current.write().await.take();
        self.store.clear().await
    }

    /// Turn a token grant into the current session.
    pub async fn establish(
        &self,
        grant: TokenGrant,
        email: impl Into<String>,
    ) -> Result<BusinessIdentity> {
        let session = Session::from_grant(grant, email);
        if !session.is_complete() {
            return Err(CarbonError::Auth("Token grant is missing token or business id".into()));
        }
        let business = session.business.clone();
        self.save(session).await?;
        info!(business_id = %business.id, "Session established");
        Ok(business)
    }

    pub async fn sign_in(
        &self,
        gateway: &dyn AuthGateway,
        credentials: &Credentials,
    ) -> Result<BusinessIdentity> {
        let grant = gateway.login(credentials).await?;
        self.establish(grant, credentials.email.clone()).await
    }

    pub async fn register(
        &self,
        gateway: &dyn AuthGateway,
        registration: &BusinessRegistration,
    ) -> Result<BusinessIdentity> {
        let grant = gateway.register(registration).await?;
        self.establish(grant, registration.email.clone()).await
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.clear().await?;
        info!("Signed out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn business(&self) -> Option<BusinessIdentity> {
        self.current.read().await.as_ref().map(|s| s.business.clone())
    }

    pub async fn access_token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.access_token.clone())
    }
}

#[async_trait]
impl AccessTokenProvider for SessionContext {
    async fn access_token(&self) -> Result<String> {
        SessionContext::access_token(self)
            .await
            .ok_or_else(|| CarbonError::Auth("Not signed in".into()))
    }

    async fn invalidate(&self) -> Result<()> {
        warn!("Access token rejected; clearing session");
        self.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::InMemorySessionStore;

    fn grant(token: &str) -> TokenGrant {
        TokenGrant {
            access_token: token.into(),
            token_type: "bearer".into(),
            business_id: "biz-7".into(),
            business_name: "Green Grocers".into(),
        }
    }

    #[tokio::test]
    async fn starts_signed_out() {
        let ctx = SessionContext::new(Arc::new(InMemorySessionStore::new()));
        assert!(!ctx.is_authenticated().await);
        assert!(ctx.business().await.is_none());
        let err = AccessTokenProvider::access_token(&ctx).await.unwrap_err();
        assert!(matches!(err, CarbonError::Auth(_)));
    }

    #[tokio::test]
    async fn establish_persists_and_load_restores() {
        let store = Arc::new(InMemorySessionStore::new());
        let ctx = SessionContext::new(store.clone());
        let business = ctx.establish(grant("tok"), "hello@green.test").await.unwrap();
        assert_eq!(business.id, "biz-7");
        assert_eq!(business.email, "hello@green.test");

        let fresh = SessionContext::new(store);
        let restored = fresh.load().await.unwrap();
        assert_eq!(restored, business);
        assert_eq!(fresh.access_token().await.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn empty_grant_is_rejected() {
        let ctx = SessionContext::new(Arc::new(InMemorySessionStore::new()));
        let err = ctx.establish(grant(""), "x@y.test").await.unwrap_err();
        assert!(matches!(err, CarbonError::Auth(_)));
        assert!(!ctx.is_authenticated().await);
    }

    #[tokio::test]
    async fn incomplete_persisted_session_loads_signed_out() {
        let mut session = Session::from_grant(grant("tok"), "x@y.test");
        session.business.id.clear();
        let ctx = SessionContext::new(Arc::new(InMemorySessionStore::with_session(session)));
        assert!(ctx.load().await.is_none());
        assert!(!ctx.is_authenticated().await);
    }

    #[tokio::test]
    async fn invalidate_clears_store() {
        let store = Arc::new(InMemorySessionStore::new());
        let ctx = SessionContext::new(store.clone());
        ctx.establish(grant("tok"), "x@y.test").await.unwrap();

        ctx.invalidate().await.unwrap();
        assert!(!ctx.is_authenticated().await);
        assert!(store.load().await.unwrap().is_none());
    }
}
