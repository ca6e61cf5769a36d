//! Application context - dependency injection container

use std::sync::Arc;

use carbonwise_core::{AccessTokenProvider, FootprintService, SessionContext};
use carbonwise_domain::{CarbonError, Config, Result};
use carbonwise_infra::{
    config, ApiAuthGateway, ApiClient, ApiClientConfig, ApiRemoteCalculator, FileSessionStore,
};
use tracing::{info, warn};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionContext>,
    pub api: Arc<ApiClient>,
    pub calculator: Arc<ApiRemoteCalculator>,
    pub auth_gateway: Arc<ApiAuthGateway>,
    pub footprint: FootprintService,
}

impl AppContext {
    /// Create a context from the configuration found by [`config::load`]
    pub async fn new() -> Result<Self> {
        Self::new_with_config(config::load()?).await
    }

    /// Create a context with a custom configuration
    ///
    /// Tests use this to point the API at a mock server and keep the
    /// session file in a temporary directory.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(FileSessionStore::new(&config.session.path));
        let session = Arc::new(SessionContext::new(store));
        match session.load().await {
            Some(business) => info!(business_id = %business.id, "Restored session"),
            None => info!("No active session"),
        }

        let tokens: Arc<dyn AccessTokenProvider> = session.clone();
        let api = Arc::new(
            ApiClient::new(ApiClientConfig::from(&config.api), Some(tokens))
                .map_err(CarbonError::from)?,
        );
        let calculator = Arc::new(ApiRemoteCalculator::new(Arc::clone(&api)));
        let auth_gateway = Arc::new(ApiAuthGateway::new(Arc::clone(&api)));

        if !config.api.remote_enabled {
            warn!("Remote calculation disabled by configuration");
        }
        let footprint = FootprintService::new(calculator.clone(), Arc::clone(&session))
            .with_timeout(config.api.timeout())
            .with_remote_enabled(config.api.remote_enabled);

        info!(base_url = %config.api.base_url, "Carbonwise context initialized");

        Ok(Self { config, session, api, calculator, auth_gateway, footprint })
    }
}
