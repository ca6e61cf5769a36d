//! Email/password authentication against the REST API

use std::sync::Arc;

use async_trait::async_trait;
use carbonwise_core::AuthGateway;
use carbonwise_domain::{BusinessRegistration, Credentials, Result as DomainResult, TokenGrant};
use tracing::{info, instrument};

use super::client::ApiClient;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";

/// [`AuthGateway`] backed by `/auth/login` and `/auth/register`
///
/// Neither endpoint takes a bearer token.
pub struct ApiAuthGateway {
    client: Arc<ApiClient>,
}

impl ApiAuthGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for ApiAuthGateway {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> DomainResult<TokenGrant> {
        let grant: TokenGrant = self.client.post_public(LOGIN_PATH, credentials).await?;
        info!(business_id = %grant.business_id, "Login accepted");
        Ok(grant)
    }

    #[instrument(skip_all, fields(email = %registration.email))]
    async fn register(&self, registration: &BusinessRegistration) -> DomainResult<TokenGrant> {
        let grant: TokenGrant = self.client.post_public(REGISTER_PATH, registration).await?;
        info!(business_id = %grant.business_id, "Business registered");
        Ok(grant)
    }
}
