#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use carbonwise_core::{
    AccessTokenProvider, FootprintService, InMemorySessionStore, SessionContext,
};
use carbonwise_domain::{BusinessIdentity, Session};
use carbonwise_infra::{ApiClient, ApiClientConfig, ApiRemoteCalculator};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-bearer-token";

/// Everything a remote-calculation test needs, wired against a mock server
pub struct RemoteHarness {
    pub session: Arc<SessionContext>,
    pub store: Arc<InMemorySessionStore>,
    pub client: Arc<ApiClient>,
    pub calculator: Arc<ApiRemoteCalculator>,
}

impl RemoteHarness {
    pub async fn signed_in(server: &MockServer) -> Self {
        let store = Arc::new(InMemorySessionStore::with_session(session()));
        Self::build(server, store).await
    }

    pub async fn signed_out(server: &MockServer) -> Self {
        Self::build(server, Arc::new(InMemorySessionStore::new())).await
    }

    async fn build(server: &MockServer, store: Arc<InMemorySessionStore>) -> Self {
        let session = Arc::new(SessionContext::new(store.clone()));
        session.load().await;

        let auth: Arc<dyn AccessTokenProvider> = session.clone();
        let client = Arc::new(
            ApiClient::new(api_config(server), Some(auth)).expect("api client should build"),
        );
        let calculator = Arc::new(ApiRemoteCalculator::new(client.clone()));

        Self { session, store, client, calculator }
    }

    pub fn service(&self) -> FootprintService {
        FootprintService::new(self.calculator.clone(), self.session.clone())
            .with_timeout(Duration::from_secs(2))
    }
}

pub fn api_config(server: &MockServer) -> ApiClientConfig {
    ApiClientConfig {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_secs(2),
        max_attempts: 2,
    }
}

pub fn session() -> Session {
    Session {
        access_token: TEST_TOKEN.to_string(),
        business: BusinessIdentity {
            id: "biz-42".to_string(),
            name: "Northwind Traders".to_string(),
            email: "ops@northwind.test".to_string(),
        },
    }
}
