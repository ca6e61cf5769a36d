//! Calculation results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use super::activity::SubjectKind;
use crate::constants::OFFSET_PRICE_USD_PER_TON;

/// The six emission categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum EmissionCategory {
    Energy,
    Transportation,
    Diet,
    Travel,
    Operations,
    SupplyChain,
}

impl EmissionCategory {
    pub const ALL: [Self; 6] = [
        Self::Energy,
        Self::Transportation,
        Self::Diet,
        Self::Travel,
        Self::Operations,
        Self::SupplyChain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Transportation => "transportation",
            Self::Diet => "diet",
            Self::Travel => "travel",
            Self::Operations => "operations",
            Self::SupplyChain => "supply_chain",
        }
    }

    /// Diet is personal; operations and supply chain are business-only.
    pub fn applies_to(self, subject: SubjectKind) -> bool {
        match self {
            Self::Diet => subject == SubjectKind::Individual,
            Self::Operations | Self::SupplyChain => subject == SubjectKind::Organization,
            Self::Energy | Self::Transportation | Self::Travel => true,
        }
    }
}

/// Category figures as another party reported them, before any checks.
///
/// Missing categories are zero. Nothing here is clamped or totalled; the
/// remote path validates these before turning them into an
/// [`EmissionsBreakdown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportedBreakdown {
    pub energy: f64,
    pub transportation: f64,
    pub diet: f64,
    pub travel: f64,
    pub operations: f64,
    pub supply_chain: f64,
    pub total: f64,
}

impl ReportedBreakdown {
    pub fn get(&self, category: EmissionCategory) -> f64 {
        match category {
            EmissionCategory::Energy => self.energy,
            EmissionCategory::Transportation => self.transportation,
            EmissionCategory::Diet => self.diet,
            EmissionCategory::Travel => self.travel,
            EmissionCategory::Operations => self.operations,
            EmissionCategory::SupplyChain => self.supply_chain,
        }
    }

    pub fn category_sum(&self) -> f64 {
        EmissionCategory::ALL.iter().map(|category| self.get(*category)).sum()
    }
}

/// Annual emissions per category, in tons CO2e.
///
/// Every category is finite and non-negative and `total` is their sum.
/// Outside this crate the only ways in are
/// [`EmissionsBreakdown::from_categories`], `From<ReportedBreakdown>` and
/// deserialization, which all clamp and re-total. Fields are public for
/// reading; assigning to one afterwards breaks the invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[non_exhaustive]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct EmissionsBreakdown {
    pub energy: f64,
    pub transportation: f64,
    pub diet: f64,
    pub travel: f64,
    pub operations: f64,
    pub supply_chain: f64,
    pub total: f64,
}

impl EmissionsBreakdown {
    /// Clamp each category at zero (non-finite counts as zero) and total
    /// them.
    pub fn from_categories(
        energy: f64,
        transportation: f64,
        diet: f64,
        travel: f64,
        operations: f64,
        supply_chain: f64,
    ) -> Self {
        let mut breakdown = Self {
            energy: clamp_category(energy),
            transportation: clamp_category(transportation),
            diet: clamp_category(diet),
            travel: clamp_category(travel),
            operations: clamp_category(operations),
            supply_chain: clamp_category(supply_chain),
            total: 0.0,
        };
        breakdown.total = breakdown.category_sum();
        breakdown
    }

    pub fn get(&self, category: EmissionCategory) -> f64 {
        match category {
            EmissionCategory::Energy => self.energy,
            EmissionCategory::Transportation => self.transportation,
            EmissionCategory::Diet => self.diet,
            EmissionCategory::Travel => self.travel,
            EmissionCategory::Operations => self.operations,
            EmissionCategory::SupplyChain => self.supply_chain,
        }
    }

    /// Sum of the six categories in display order
    pub fn category_sum(&self) -> f64 {
        self.energy
            + self.transportation
            + self.diet
            + self.travel
            + self.operations
            + self.supply_chain
    }

    /// Share of the total held by `category`, or zero for an empty total.
    pub fn share(&self, category: EmissionCategory) -> f64 {
        if self.total > 0.0 {
            self.get(category) / self.total
        } else {
            0.0
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0.0
    }
}

impl From<ReportedBreakdown> for EmissionsBreakdown {
    fn from(reported: ReportedBreakdown) -> Self {
        Self::from_categories(
            reported.energy,
            reported.transportation,
            reported.diet,
            reported.travel,
            reported.operations,
            reported.supply_chain,
        )
    }
}

/// Stored breakdowns are re-clamped and re-totalled on the way in.
impl<'de> Deserialize<'de> for EmissionsBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ReportedBreakdown::deserialize(deserializer).map(Self::from)
    }
}

fn clamp_category(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Where a result was computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum CalculationSource {
    Remote,
    Local,
}

/// What the results panel shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct FootprintReport {
    pub breakdown: EmissionsBreakdown,
    pub recommendations: Vec<String>,
    pub offset_cost_estimate_usd: f64,
    pub source: CalculationSource,
}

/// Cost of offsetting `total_tons` at the average credit price, in USD
/// rounded to cents.
pub fn offset_cost_usd(total_tons: f64) -> f64 {
    (total_tons * OFFSET_PRICE_USD_PER_TON * 100.0).round() / 100.0
}

/// One press of the *Calculate* action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct CalculationOutcome {
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub id: Uuid,
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub calculated_at: DateTime<Utc>,
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub subject: SubjectKind,
    pub report: FootprintReport,
    /// Non-fatal message for the user, set when the remote attempt failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl CalculationOutcome {
    pub fn new(subject: SubjectKind, report: FootprintReport, notice: Option<String>) -> Self {
        Self { id: Uuid::now_v7(), calculated_at: Utc::now(), subject, report, notice }
    }

    pub fn breakdown(&self) -> &EmissionsBreakdown {
        &self.report.breakdown
    }

    pub fn source(&self) -> CalculationSource {
        self.report.source
    }

    /// True when a remote attempt was made and the local estimate replaced it
    pub fn is_fallback(&self) -> bool {
        self.notice.is_some() && self.report.source == CalculationSource::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_sum_of_categories() {
        let b = EmissionsBreakdown::from_categories(0.4, 2.772, 0.0, 1.5, 250.0, 30.0);
        assert_eq!(b.total, b.category_sum());
        assert!((b.total - 284.672).abs() < 1e-9);
    }

    #[test]
    fn negative_and_non_finite_categories_clamp_to_zero() {
        let b = EmissionsBreakdown::from_categories(-1.0, f64::NAN, f64::INFINITY, -0.0, 3.0, 0.0);
        assert_eq!(b.energy, 0.0);
        assert_eq!(b.transportation, 0.0);
        assert_eq!(b.diet, 0.0);
        assert_eq!(b.travel, 0.0);
        assert!(b.travel.is_sign_positive());
        assert_eq!(b.total, 3.0);
    }

    #[test]
    fn share_handles_empty_total() {
        let empty = EmissionsBreakdown::default();
        assert!(empty.is_zero());
        assert_eq!(empty.share(EmissionCategory::Energy), 0.0);

        let b = EmissionsBreakdown::from_categories(1.0, 3.0, 0.0, 0.0, 0.0, 0.0);
        assert!((b.share(EmissionCategory::Transportation) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn deserializing_recomputes_total_and_clamps() {
        let b: EmissionsBreakdown = serde_json::from_str(
            r#"{"energy": 2.0, "operations": -4.0, "supply_chain": 1.5, "total": 999.0}"#,
        )
        .unwrap();
        assert_eq!(b.operations, 0.0);
        assert_eq!(b.total, 3.5);
    }

    #[test]
    fn category_applicability_by_subject() {
        use EmissionCategory::{Diet, Energy, Operations, SupplyChain};

        assert!(Diet.applies_to(SubjectKind::Individual));
        assert!(!Diet.applies_to(SubjectKind::Organization));
        assert!(!Operations.applies_to(SubjectKind::Individual));
        assert!(!SupplyChain.applies_to(SubjectKind::Individual));
        assert!(Energy.applies_to(SubjectKind::Individual));
        assert!(Energy.applies_to(SubjectKind::Organization));
    }

    #[test]
    fn offset_cost_rounds_to_cents() {
        assert_eq!(offset_cost_usd(0.0), 0.0);
        assert_eq!(offset_cost_usd(2.772), 55.44);
        assert_eq!(offset_cost_usd(0.12345), 2.47);
    }

    #[test]
    fn category_labels_match_serde() {
        for category in EmissionCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.as_str());
        }
    }

    #[test]
    fn outcome_ids_are_unique() {
        let report = FootprintReport {
            breakdown: EmissionsBreakdown::default(),
            recommendations: vec![],
            offset_cost_estimate_usd: 0.0,
            source: CalculationSource::Local,
        };
        let a = CalculationOutcome::new(SubjectKind::Individual, report.clone(), None);
        let b = CalculationOutcome::new(SubjectKind::Individual, report, None);
        assert_ne!(a.id, b.id);
        assert!(!a.is_fallback());
    }
}
