//! Remote calculator adapter
//!
//! Implements the core [`RemoteCalculator`] port on top of
//! `POST /calculator/calculate` and exposes the persisted history.

use std::sync::Arc;

use async_trait::async_trait;
use carbonwise_core::{RemoteCalculation, RemoteCalculator};
use carbonwise_domain::{
    ActivityInput, CalculationRecord, CarbonError, ReportedBreakdown, Result as DomainResult,
    SubjectKind,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::client::ApiClient;

const CALCULATE_PATH: &str = "/calculator/calculate";
const HISTORY_PATH: &str = "/calculator/history";

/// Request body of `/calculator/calculate`
///
/// Section maps keep the form's camelCase keys.
#[derive(Debug, Serialize)]
struct CalculationRequest {
    energy_data: serde_json::Value,
    transportation_data: serde_json::Value,
    operations_data: serde_json::Value,
    supply_chain_data: serde_json::Value,
    diet_data: serde_json::Value,
    travel_data: serde_json::Value,
    subject_kind: &'static str,
}

impl CalculationRequest {
    fn new(input: &ActivityInput, subject: SubjectKind) -> serde_json::Result<Self> {
        Ok(Self {
            energy_data: serde_json::to_value(&input.energy)?,
            transportation_data: serde_json::to_value(&input.transportation)?,
            operations_data: serde_json::to_value(&input.operations)?,
            supply_chain_data: serde_json::to_value(&input.supply_chain)?,
            diet_data: serde_json::to_value(&input.diet)?,
            travel_data: serde_json::to_value(&input.travel)?,
            subject_kind: subject.as_str(),
        })
    }
}

/// Response body of `/calculator/calculate`
///
/// The breakdown omits `total` and any category the server does not
/// compute; both read as zero.
#[derive(Debug, Deserialize)]
struct CalculationResponse {
    total_emissions: f64,
    #[serde(default)]
    breakdown: ReportedBreakdown,
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    offset_cost_estimate: Option<f64>,
}

impl From<CalculationResponse> for RemoteCalculation {
    fn from(response: CalculationResponse) -> Self {
        // Figures are passed on unclamped; the service validates them.
        Self {
            breakdown: ReportedBreakdown { total: response.total_emissions, ..response.breakdown },
            recommendations: response.recommendations,
            offset_cost_estimate_usd: response.offset_cost_estimate,
        }
    }
}

/// [`RemoteCalculator`] backed by the REST API
pub struct ApiRemoteCalculator {
    client: Arc<ApiClient>,
}

impl ApiRemoteCalculator {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Calculations the signed-in business has run, as stored by the server
    ///
    /// # Errors
    ///
    /// Returns `CarbonError::Auth` when signed out or the token is rejected,
    /// and a network or decode error otherwise.
    #[instrument(skip(self))]
    pub async fn history(&self) -> DomainResult<Vec<CalculationRecord>> {
        let records: Vec<CalculationRecord> = self.client.get(HISTORY_PATH).await?;
        debug!(count = records.len(), "Fetched calculation history");
        Ok(records)
    }
}

#[async_trait]
impl RemoteCalculator for ApiRemoteCalculator {
    #[instrument(skip(self, input), fields(subject = %subject))]
    async fn calculate(
        &self,
        input: &ActivityInput,
        subject: SubjectKind,
    ) -> DomainResult<RemoteCalculation> {
        let request = CalculationRequest::new(input, subject)
            .map_err(|e| CarbonError::Internal(format!("Failed to encode input: {e}")))?;
        let response: CalculationResponse = self.client.post(CALCULATE_PATH, &request).await?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use carbonwise_domain::{EnergyInput, OperationsInput};

    use super::*;

    #[test]
    fn request_keeps_form_keys() {
        let input = ActivityInput {
            energy: EnergyInput {
                electricity: 5000.0,
                renewable_percentage: 20.0,
                ..Default::default()
            },
            operations: OperationsInput {
                employees: 12.0,
                data_center: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let request = CalculationRequest::new(&input, SubjectKind::Organization).unwrap();
        let body = serde_json::to_value(request).unwrap();

        assert_eq!(body["energy_data"]["electricity"], 5000.0);
        assert_eq!(body["energy_data"]["renewablePercentage"], 20.0);
        assert_eq!(body["operations_data"]["dataCenter"], true);
        assert_eq!(body["subject_kind"], "organization");
        assert!(body["diet_data"].is_object());
    }

    #[test]
    fn response_without_diet_or_travel_fills_zero() {
        let response: CalculationResponse = serde_json::from_str(
            r#"{"total_emissions": 274.4,
                "breakdown": {"energy": 24.0, "transportation": 0.4,
                              "operations": 250.0, "supply_chain": 0.0},
                "recommendations": ["Purchase verified carbon credits to offset remaining emissions"],
                "offset_cost_estimate": 5488.0}"#,
        )
        .unwrap();

        let remote: RemoteCalculation = response.into();
        assert_eq!(remote.breakdown.diet, 0.0);
        assert_eq!(remote.breakdown.travel, 0.0);
        assert_eq!(remote.breakdown.total, 274.4);
        assert_eq!(remote.offset_cost_estimate_usd, Some(5488.0));
        assert_eq!(remote.recommendations.len(), 1);
    }
}
