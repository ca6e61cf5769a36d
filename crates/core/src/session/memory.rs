//! In-process session store

use async_trait::async_trait;
use carbonwise_domain::{Result, Session};
use tokio::sync::RwLock;

use super::ports::SessionStore;

/// Session store that lives only as long as the process
///
/// Used for ephemeral runs (`--local`, tests) where nothing should touch
/// the filesystem.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `session` already persisted.
    pub fn with_session(session: Session) -> Self {
        Self { session: RwLock::new(Some(session)) }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.session.write().await.take();
        Ok(())
    }
}
