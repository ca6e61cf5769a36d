//! Recommendations and the report built around a breakdown

use carbonwise_domain::{
    offset_cost_usd, ActivityInput, CalculationSource, EmissionCategory, EmissionsBreakdown,
    FootprintReport,
};

/// Renewable share below which switching supply is suggested
const RENEWABLE_SWITCH_BELOW_PCT: f64 = 50.0;

/// Share of the total above which a category gets its own advice
const ENERGY_SHARE: f64 = 0.30;
const TRANSPORTATION_SHARE: f64 = 0.30;
const OPERATIONS_SHARE: f64 = 0.25;
const SUPPLY_CHAIN_SHARE: f64 = 0.20;

pub const RENEWABLE_SWITCH: &str = "Consider switching to renewable energy sources";
pub const ENERGY_EFFICIENCY: &str = "Implement energy efficiency measures in your facilities";
pub const LOW_EMISSION_FLEET: &str = "Consider electric or hybrid vehicles for your fleet";
pub const REMOTE_WORK: &str = "Implement remote work policies to reduce business travel";
pub const GREEN_BUILDING: &str = "Optimize office space usage and implement green building practices";
pub const CLOUD_MIGRATION: &str = "Consider cloud migration to reduce data center emissions";
pub const LOCAL_SUPPLIERS: &str = "Work with local suppliers to reduce shipping distances";
pub const SUSTAINABLE_PACKAGING: &str = "Switch to sustainable packaging materials";
pub const PURCHASE_CREDITS: &str = "Purchase verified carbon credits to offset remaining emissions";
pub const SCIENCE_BASED_TARGETS: &str = "Set science-based targets for emission reduction";

/// Advice for the dominant categories, followed by the two general items.
///
/// An empty total triggers no category rule.
pub fn recommendations(breakdown: &EmissionsBreakdown, input: &ActivityInput) -> Vec<String> {
    let mut advice: Vec<&str> = Vec::new();

    if breakdown.share(EmissionCategory::Energy) > ENERGY_SHARE {
        if input.energy.renewable_percentage < RENEWABLE_SWITCH_BELOW_PCT {
            advice.push(RENEWABLE_SWITCH);
        }
        advice.push(ENERGY_EFFICIENCY);
    }

    if breakdown.share(EmissionCategory::Transportation) > TRANSPORTATION_SHARE {
        advice.extend([LOW_EMISSION_FLEET, REMOTE_WORK]);
    }

    if breakdown.share(EmissionCategory::Operations) > OPERATIONS_SHARE {
        advice.push(GREEN_BUILDING);
        if input.operations.data_center {
            advice.push(CLOUD_MIGRATION);
        }
    }

    if breakdown.share(EmissionCategory::SupplyChain) > SUPPLY_CHAIN_SHARE {
        advice.extend([LOCAL_SUPPLIERS, SUSTAINABLE_PACKAGING]);
    }

    advice.extend([PURCHASE_CREDITS, SCIENCE_BASED_TARGETS]);
    advice.into_iter().map(String::from).collect()
}

/// Wrap a locally computed breakdown into a displayable report.
pub fn build_report(breakdown: EmissionsBreakdown, input: &ActivityInput) -> FootprintReport {
    FootprintReport {
        recommendations: recommendations(&breakdown, input),
        offset_cost_estimate_usd: offset_cost_usd(breakdown.total),
        breakdown,
        source: CalculationSource::Local,
    }
}
