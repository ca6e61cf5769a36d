//! Port interfaces for remote calculation

use async_trait::async_trait;
use carbonwise_domain::{ActivityInput, ReportedBreakdown, Result, SubjectKind};

/// What the remote calculator answered, before validation
///
/// `breakdown` carries the server's figures as reported, including its
/// `total`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCalculation {
    pub breakdown: ReportedBreakdown,
    pub recommendations: Vec<String>,
    pub offset_cost_estimate_usd: Option<f64>,
}

/// Trait for the server-side footprint calculator
#[async_trait]
pub trait RemoteCalculator: Send + Sync {
    /// Submit `input` for calculation. The server persists one record per
    /// call.
    async fn calculate(
        &self,
        input: &ActivityInput,
        subject: SubjectKind,
    ) -> Result<RemoteCalculation>;
}
