//! Calculations persisted by the remote API

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of `/calculator/history`
///
/// The raw input maps are kept as JSON because the server stores whatever
/// the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: String,
    pub business_id: String,
    #[serde(deserialize_with = "utc_timestamp")]
    pub calculation_date: DateTime<Utc>,
    #[serde(default)]
    pub energy_data: serde_json::Value,
    #[serde(default)]
    pub transportation_data: serde_json::Value,
    #[serde(default)]
    pub operations_data: serde_json::Value,
    #[serde(default)]
    pub supply_chain_data: serde_json::Value,
    pub total_emissions: f64,
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
}

/// Accept RFC 3339 timestamps and offset-less ones, which are UTC.
fn utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}
