//! Remote-first footprint calculation with local fallback

use std::sync::Arc;
use std::time::Duration;

use carbonwise_domain::constants::{DEFAULT_REMOTE_TIMEOUT_SECS, REMOTE_TOTAL_TOLERANCE_TONS};
use carbonwise_domain::{
    offset_cost_usd, ActivityInput, CalculationOutcome, CalculationSource, CarbonError,
    EmissionCategory, EmissionsBreakdown, FootprintReport, ReportedBreakdown, SubjectKind,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::ports::{RemoteCalculation, RemoteCalculator};
use crate::footprint::{build_report, estimate, recommendations};
use crate::session::{AccessTokenProvider, SessionContext};

/// Why a remote attempt was abandoned
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteFailure {
    #[error("remote calculation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Failed(#[from] CarbonError),

    #[error("remote result rejected: {0}")]
    Rejected(String),
}

impl RemoteFailure {
    /// Short label shown to the user and attached to logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Failed(err) => err.label(),
            Self::Rejected(_) => "invalid_result",
        }
    }

    /// Notice attached to the local result that replaced the remote one
    pub fn notice(&self) -> String {
        format!("Remote calculation unavailable ({}); showing local estimate", self.label())
    }
}

/// Footprint calculation service
///
/// Tries the remote calculator when one is wired, enabled and a session is
/// signed in, and falls back to the local estimator otherwise. Remote and
/// local figures are never mixed in one result.
pub struct FootprintService {
    remote: Option<Arc<dyn RemoteCalculator>>,
    session: Option<Arc<SessionContext>>,
    remote_enabled: bool,
    timeout: Duration,
}

impl Default for FootprintService {
    fn default() -> Self {
        Self::local_only()
    }
}

impl FootprintService {
    /// A service that never leaves the process
    pub fn local_only() -> Self {
        Self {
            remote: None,
            session: None,
            remote_enabled: false,
            timeout: Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS),
        }
    }

    /// A service that tries `remote` on behalf of the signed-in `session`
    pub fn new(remote: Arc<dyn RemoteCalculator>, session: Arc<SessionContext>) -> Self {
        Self {
            remote: Some(remote),
            session: Some(session),
            remote_enabled: true,
            ..Self::local_only()
        }
    }

    /// Upper bound for one remote attempt
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Turn the remote path on or off without rewiring
    pub fn with_remote_enabled(mut self, enabled: bool) -> Self {
        self.remote_enabled = enabled;
        self
    }

    /// Calculate a footprint. Never fails: remote problems become a notice
    /// on a local result.
    pub async fn calculate(
        &self,
        input: &ActivityInput,
        subject: SubjectKind,
    ) -> CalculationOutcome {
        let Some(remote) = self.remote_target().await else {
            debug!(subject = %subject, "Calculating locally");
            return self.calculate_local(input, subject);
        };

        match self.try_remote(remote.as_ref(), input, subject).await {
            Ok(report) => {
                info!(
                    subject = %subject,
                    total_tons = report.breakdown.total,
                    "Remote calculation accepted"
                );
                CalculationOutcome::new(subject, report, None)
            }
            Err(failure) => {
                warn!(
                    subject = %subject,
                    reason = failure.label(),
                    error = %failure,
                    "Remote calculation failed; using local estimate"
                );
                if matches!(failure, RemoteFailure::Failed(CarbonError::Auth(_))) {
                    self.drop_rejected_session().await;
                }
                let local = local_report(input, subject);
                CalculationOutcome::new(subject, local, Some(failure.notice()))
            }
        }
    }

    /// Calculate with the local estimator only.
    pub fn calculate_local(
        &self,
        input: &ActivityInput,
        subject: SubjectKind,
    ) -> CalculationOutcome {
        CalculationOutcome::new(subject, local_report(input, subject), None)
    }

    async fn remote_target(&self) -> Option<&Arc<dyn RemoteCalculator>> {
        if !self.remote_enabled {
            return None;
        }
        let remote = self.remote.as_ref()?;
        let session = self.session.as_ref()?;
        session.is_authenticated().await.then_some(remote)
    }

    async fn try_remote(
        &self,
        remote: &dyn RemoteCalculator,
        input: &ActivityInput,
        subject: SubjectKind,
    ) -> Result<FootprintReport, RemoteFailure> {
        let calculation = tokio::time::timeout(self.timeout, remote.calculate(input, subject))
            .await
            .map_err(|_| RemoteFailure::Timeout(self.timeout))??;

        let RemoteCalculation { breakdown, recommendations: advice, offset_cost_estimate_usd } =
            calculation;
        let breakdown = validate_remote(&breakdown, subject)?;

        let recommendations =
            if advice.is_empty() { recommendations(&breakdown, input) } else { advice };
        let offset_cost_estimate_usd = offset_cost_estimate_usd
            .filter(|cost| cost.is_finite() && *cost >= 0.0)
            .unwrap_or_else(|| offset_cost_usd(breakdown.total));

        Ok(FootprintReport {
            breakdown,
            recommendations,
            offset_cost_estimate_usd,
            source: CalculationSource::Remote,
        })
    }

    async fn drop_rejected_session(&self) {
        if let Some(session) = &self.session {
            if let Err(err) = session.invalidate().await {
                warn!(error = %err, "Failed to clear rejected session");
            }
        }
    }
}

fn local_report(input: &ActivityInput, subject: SubjectKind) -> FootprintReport {
    build_report(estimate(input, subject), input)
}

/// Check a server breakdown for `subject` and rebuild it with a recomputed
/// total.
///
/// # Errors
/// Returns [`RemoteFailure::Rejected`] when a category is negative or not
/// finite, when a category that does not apply to `subject` is non-zero, or
/// when the reported total disagrees with the category sum by more than the
/// rounding tolerance.
pub fn validate_remote(
    reported: &ReportedBreakdown,
    subject: SubjectKind,
) -> Result<EmissionsBreakdown, RemoteFailure> {
    for category in EmissionCategory::ALL {
        let value = reported.get(category);
        if !value.is_finite() || value < 0.0 {
            return Err(RemoteFailure::Rejected(format!("{} is {value}", category.as_str())));
        }
        if value != 0.0 && !category.applies_to(subject) {
            return Err(RemoteFailure::Rejected(format!(
                "{} is {value} for {subject}",
                category.as_str()
            )));
        }
    }

    let sum = reported.category_sum();
    if !reported.total.is_finite() || (reported.total - sum).abs() > REMOTE_TOTAL_TOLERANCE_TONS {
        return Err(RemoteFailure::Rejected(format!(
            "total {} does not match category sum {sum}",
            reported.total
        )));
    }

    Ok(EmissionsBreakdown::from(*reported))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUSINESS: SubjectKind = SubjectKind::Organization;

    fn reported(total: f64) -> ReportedBreakdown {
        ReportedBreakdown {
            energy: 24.0,
            transportation: 10.5,
            diet: 0.0,
            travel: 0.0,
            operations: 250.0,
            supply_chain: 15.0,
            total,
        }
    }

    #[test]
    fn accepts_rounded_total_and_recomputes_it() {
        let accepted = validate_remote(&reported(299.52), BUSINESS).unwrap();
        assert_eq!(accepted.total, 299.5);
    }

    #[test]
    fn rejects_total_outside_tolerance() {
        let failure = validate_remote(&reported(310.0), BUSINESS).unwrap_err();
        assert_eq!(failure.label(), "invalid_result");
    }

    #[test]
    fn rejects_negative_and_nan_categories() {
        let mut breakdown = reported(299.5);
        breakdown.energy = -1.0;
        assert!(validate_remote(&breakdown, BUSINESS).is_err());

        let mut breakdown = reported(299.5);
        breakdown.travel = f64::NAN;
        assert!(validate_remote(&breakdown, BUSINESS).is_err());
    }

    #[test]
    fn rejects_categories_outside_the_subject() {
        // operations and supply chain belong to organizations only
        let failure = validate_remote(&reported(299.5), SubjectKind::Individual).unwrap_err();
        assert!(matches!(&failure, RemoteFailure::Rejected(msg) if msg.starts_with("operations")));

        let mut with_diet = reported(300.5);
        with_diet.diet = 1.0;
        assert!(validate_remote(&with_diet, BUSINESS).is_err());

        let person = ReportedBreakdown {
            energy: 1.0,
            diet: 0.55,
            total: 1.55,
            ..Default::default()
        };
        let accepted = validate_remote(&person, SubjectKind::Individual).unwrap();
        assert_eq!(accepted.diet, 0.55);
    }

    #[test]
    fn notice_names_the_failure() {
        let failure = RemoteFailure::Failed(CarbonError::Network("connection refused".into()));
        assert_eq!(
            failure.notice(),
            "Remote calculation unavailable (network); showing local estimate"
        );
        assert_eq!(RemoteFailure::Timeout(Duration::from_secs(1)).label(), "timeout");
    }

    #[test]
    fn local_only_service_reports_local_source() {
        let service = FootprintService::local_only();
        let outcome = service.calculate_local(&ActivityInput::default(), SubjectKind::Individual);
        assert_eq!(outcome.source(), CalculationSource::Local);
        assert!(outcome.notice.is_none());
    }
}
