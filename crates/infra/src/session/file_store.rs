//! JSON file implementation of [`SessionStore`]
//!
//! The session is written as a single JSON document. Parent directories are
//! created on first save; clearing removes the file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use carbonwise_core::SessionStore;
use carbonwise_domain::{CarbonError, Result, Session};
use tracing::{debug, instrument};

use crate::errors::InfraError;

/// Session store backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Option<Session>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        let session: Session = serde_json::from_slice(&contents).map_err(|e| {
            CarbonError::Storage(format!("Corrupt session file {}: {}", self.path.display(), e))
        })?;
        debug!("Loaded persisted session");
        Ok(Some(session))
    }

    #[instrument(skip(self, session), fields(path = %self.path.display()))]
    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        let contents = serde_json::to_vec_pretty(session).map_err(InfraError::from)?;
        tokio::fs::write(&self.path, contents).await.map_err(InfraError::from)?;
        debug!("Persisted session");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Removed session file");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}
