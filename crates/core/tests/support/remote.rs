//! Scripted remote calculator and auth gateway

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use carbonwise_core::{AuthGateway, RemoteCalculation, RemoteCalculator};
use carbonwise_domain::{
    ActivityInput, BusinessRegistration, CarbonError, Credentials, ReportedBreakdown,
    Result as DomainResult, SubjectKind, TokenGrant,
};

/// What the scripted remote does on every call
#[derive(Debug, Clone)]
pub enum RemoteScript {
    Respond(RemoteCalculation),
    Fail(CarbonError),
    Hang(Duration),
}

/// `RemoteCalculator` that follows a script and counts calls.
#[derive(Debug)]
pub struct ScriptedRemote {
    script: RemoteScript,
    calls: AtomicUsize,
}

impl ScriptedRemote {
    pub fn new(script: RemoteScript) -> Self {
        Self { script, calls: AtomicUsize::new(0) }
    }

    pub fn responding(breakdown: ReportedBreakdown) -> Self {
        Self::new(RemoteScript::Respond(RemoteCalculation {
            breakdown,
            recommendations: Vec::new(),
            offset_cost_estimate_usd: None,
        }))
    }

    pub fn failing(error: CarbonError) -> Self {
        Self::new(RemoteScript::Fail(error))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteCalculator for ScriptedRemote {
    async fn calculate(
        &self,
        _input: &ActivityInput,
        _subject: SubjectKind,
    ) -> DomainResult<RemoteCalculation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            RemoteScript::Respond(calculation) => Ok(calculation.clone()),
            RemoteScript::Fail(error) => Err(error.clone()),
            RemoteScript::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Err(CarbonError::Network("scripted remote woke up".into()))
            }
        }
    }
}

/// `AuthGateway` that accepts one password and rejects everything else.
#[derive(Debug, Clone)]
pub struct StaticAuthGateway {
    pub password: String,
    pub grant: TokenGrant,
}

impl StaticAuthGateway {
    pub fn new(password: &str) -> Self {
        Self {
            password: password.to_string(),
            grant: TokenGrant {
                access_token: "granted-token".to_string(),
                token_type: "bearer".to_string(),
                business_id: "biz-99".to_string(),
                business_name: "Evergreen Co".to_string(),
            },
        }
    }
}

#[async_trait]
impl AuthGateway for StaticAuthGateway {
    async fn login(&self, credentials: &Credentials) -> DomainResult<TokenGrant> {
        if credentials.password == self.password {
            Ok(self.grant.clone())
        } else {
            Err(CarbonError::Auth("Incorrect email or password".into()))
        }
    }

    async fn register(&self, registration: &BusinessRegistration) -> DomainResult<TokenGrant> {
        if registration.email.contains('@') {
            Ok(TokenGrant { business_name: registration.name.clone(), ..self.grant.clone() })
        } else {
            Err(CarbonError::InvalidInput("Email already registered".into()))
        }
    }
}
