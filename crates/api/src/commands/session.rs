//! Sign-in, sign-out and account commands

use carbonwise_core::AccessTokenProvider;
use carbonwise_domain::{
    BusinessIdentity, BusinessRegistration, CalculationRecord, CarbonError, Credentials,
    Result as DomainResult,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Snapshot of the session and API reachability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub signed_in: bool,
    pub business: Option<BusinessIdentity>,
    pub api_base_url: String,
    pub api_reachable: bool,
    pub remote_enabled: bool,
}

/// Sign in with email and password and persist the session.
pub async fn login(ctx: &AppContext, credentials: &Credentials) -> DomainResult<BusinessIdentity> {
    execute_logged("session::login", || async {
        ctx.session.sign_in(ctx.auth_gateway.as_ref(), credentials).await
    })
    .await
}

/// Create a business account and sign it in.
pub async fn register(
    ctx: &AppContext,
    registration: &BusinessRegistration,
) -> DomainResult<BusinessIdentity> {
    execute_logged("session::register", || async {
        ctx.session.register(ctx.auth_gateway.as_ref(), registration).await
    })
    .await
}

/// Forget the persisted session. Signing out while signed out is a no-op.
pub async fn logout(ctx: &AppContext) -> DomainResult<()> {
    execute_logged("session::logout", || async { ctx.session.sign_out().await }).await
}

/// Report who is signed in and whether the API answers its health probe.
///
/// An unreachable API is reported, not raised.
pub async fn status(ctx: &AppContext) -> SessionStatus {
    let business = ctx.session.business().await;
    let api_reachable = match ctx.api.health_check().await {
        Ok(healthy) => healthy,
        Err(err) => {
            warn!(error = %err, "API health check failed");
            false
        }
    };

    SessionStatus {
        signed_in: business.is_some(),
        business,
        api_base_url: ctx.api.base_url().to_string(),
        api_reachable,
        remote_enabled: ctx.config.api.remote_enabled,
    }
}

/// Calculations stored by the server for the signed-in business.
///
/// A rejected token clears the local session, as a rejected calculation
/// does.
///
/// # Errors
/// Returns `CarbonError::Auth` when signed out or the server rejects the
/// token.
pub async fn history(ctx: &AppContext) -> DomainResult<Vec<CalculationRecord>> {
    execute_logged("session::history", || async {
        let result = ctx.calculator.history().await;
        if matches!(result, Err(CarbonError::Auth(_))) && ctx.session.is_authenticated().await {
            ctx.session.invalidate().await?;
        }
        let records = result?;
        info!(count = records.len(), "Loaded calculation history");
        Ok(records)
    })
    .await
}
