//! Activity metrics entered on the calculator form
//!
//! Every numeric field is optional in spirit: absent, empty or non-numeric
//! values are zero. Enumerated fields fall back to a baseline value, except
//! the diet choice, which stays unset until something is picked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{
    CAR_MULTIPLIER, CONVENTIONAL_PACKAGING_FACTOR, DIESEL_KG_PER_UNIT, ELECTRIC_KG_PER_UNIT,
    HEAVY_VEHICLE_MULTIPLIER, HIGH_MEAT_KG_PER_DAY, HYBRID_KG_PER_UNIT,
    LIGHT_VEHICLE_MULTIPLIER, LONG_FLIGHT_TONS, LOW_MEAT_KG_PER_DAY, MEDIUM_FLIGHT_TONS,
    MEDIUM_MEAT_KG_PER_DAY, MIXED_DIET_KG_PER_DAY, MIXED_PACKAGING_FACTOR, PETROL_KG_PER_UNIT,
    RECYCLED_PACKAGING_FACTOR, SHORT_FLIGHT_TONS, UNSPECIFIED_FLIGHT_TONS, VEGAN_KG_PER_DAY,
    VEGETARIAN_KG_PER_DAY,
};
use crate::impl_domain_enum_conversions;
use crate::utils::lenient::{lenient_bool, lenient_f64, lenient_string};
use crate::utils::{is_truthy, parse_or_zero};

// ============================================================================
// Enumerations
// ============================================================================

/// Who the footprint describes. Drives which categories apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubjectKind {
    /// A person: diet applies, operations and supply chain do not
    Individual,
    /// A business: operations and supply chain apply, diet does not
    #[default]
    Organization,
}

impl_domain_enum_conversions!(SubjectKind {
    Individual => "individual" | "person" | "personal",
    Organization => "organization" | "organisation" | "business",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VehicleType {
    #[default]
    Car,
    Light,
    Heavy,
}

impl_domain_enum_conversions!(VehicleType {
    Car => "car",
    Light => "light" | "van",
    Heavy => "heavy" | "truck",
});

impl VehicleType {
    /// Emission multiplier relative to a passenger car
    pub fn class_multiplier(self) -> f64 {
        match self {
            Self::Car => CAR_MULTIPLIER,
            Self::Light => LIGHT_VEHICLE_MULTIPLIER,
            Self::Heavy => HEAVY_VEHICLE_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

impl_domain_enum_conversions!(FuelType {
    Petrol => "petrol" | "gasoline",
    Diesel => "diesel",
    Electric => "electric" | "ev",
    Hybrid => "hybrid",
});

impl FuelType {
    /// kg CO2e per litre of fuel (per kWh for electric)
    pub fn kg_per_unit(self) -> f64 {
        match self {
            Self::Petrol => PETROL_KG_PER_UNIT,
            Self::Diesel => DIESEL_KG_PER_UNIT,
            Self::Electric => ELECTRIC_KG_PER_UNIT,
            Self::Hybrid => HYBRID_KG_PER_UNIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DietType {
    Vegan,
    Vegetarian,
    LowMeat,
    MediumMeat,
    HighMeat,
    #[default]
    Mixed,
}

impl_domain_enum_conversions!(DietType {
    Vegan => "vegan",
    Vegetarian => "vegetarian",
    LowMeat => "low-meat" | "low_meat" | "lowmeat",
    MediumMeat => "medium-meat" | "medium_meat" | "mediummeat",
    HighMeat => "high-meat" | "high_meat" | "highmeat",
    Mixed => "mixed",
});

impl DietType {
    /// Baseline kg CO2e per day before restaurant and local-food factors
    pub fn daily_kg(self) -> f64 {
        match self {
            Self::Vegan => VEGAN_KG_PER_DAY,
            Self::Vegetarian => VEGETARIAN_KG_PER_DAY,
            Self::LowMeat => LOW_MEAT_KG_PER_DAY,
            Self::MediumMeat => MEDIUM_MEAT_KG_PER_DAY,
            Self::HighMeat => HIGH_MEAT_KG_PER_DAY,
            Self::Mixed => MIXED_DIET_KG_PER_DAY,
        }
    }
}

/// Flight-duration class. Anything unrecognized is `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlightDuration {
    Short,
    Medium,
    Long,
    #[default]
    Unspecified,
}

impl_domain_enum_conversions!(FlightDuration {
    Short => "short",
    Medium => "medium",
    Long => "long",
    Unspecified => "unspecified",
});

impl FlightDuration {
    pub fn tons_per_flight(self) -> f64 {
        match self {
            Self::Short => SHORT_FLIGHT_TONS,
            Self::Medium => MEDIUM_FLIGHT_TONS,
            Self::Long => LONG_FLIGHT_TONS,
            Self::Unspecified => UNSPECIFIED_FLIGHT_TONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackagingType {
    Recycled,
    Mixed,
    #[default]
    Conventional,
}

impl_domain_enum_conversions!(PackagingType {
    Recycled => "recycled",
    Mixed => "mixed",
    Conventional => "conventional",
});

impl PackagingType {
    pub fn factor(self) -> f64 {
        match self {
            Self::Recycled => RECYCLED_PACKAGING_FACTOR,
            Self::Mixed => MIXED_PACKAGING_FACTOR,
            Self::Conventional => CONVENTIONAL_PACKAGING_FACTOR,
        }
    }
}

// ============================================================================
// Input groups
// ============================================================================

/// Monthly energy use
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct EnergyInput {
    /// kWh per month
    #[serde(default, deserialize_with = "lenient_f64")]
    pub electricity: f64,
    /// therms per month
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gas: f64,
    /// 0-100
    #[serde(default, deserialize_with = "lenient_f64")]
    pub renewable_percentage: f64,
}

/// Vehicle use plus distance moved onto sustainable modes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct TransportationInput {
    #[serde(default)]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub vehicle_type: VehicleType,
    #[serde(default)]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub fuel_type: FuelType,
    /// Distance per vehicle per month
    #[serde(default, deserialize_with = "lenient_f64")]
    pub monthly_distance: f64,
    /// Distance per unit of fuel
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vehicle_efficiency: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vehicle_count: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub public_transport_distance: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub walking_cycling_distance: f64,
}

/// Eating habits (individuals only)
///
/// `diet_type` is `None` until a diet is chosen. A section with no diet
/// and no meal or local-food figures is blank and contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct DietInput {
    #[serde(default, deserialize_with = "diet_selection")]
    #[cfg_attr(feature = "ts-gen", ts(type = "string | null"))]
    pub diet_type: Option<DietType>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub restaurant_meals_per_week: f64,
    /// 0-100
    #[serde(default, deserialize_with = "lenient_f64")]
    pub local_food_percentage: f64,
}

impl DietInput {
    /// Nothing was entered in the diet section.
    pub fn is_blank(&self) -> bool {
        self.diet_type.is_none()
            && self.restaurant_meals_per_week == 0.0
            && self.local_food_percentage == 0.0
    }

    /// The chosen diet, or the mixed baseline when only the meal or
    /// local-food figures were filled in.
    pub fn baseline(&self) -> DietType {
        self.diet_type.unwrap_or_default()
    }
}

fn diet_selection<'de, D>(deserializer: D) -> Result<Option<DietType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = lenient_string(deserializer)?;
    Ok(raw.and_then(|s| DietType::from_selection(&s)))
}

/// Air travel and hotel stays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct TravelInput {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub flights_per_year: f64,
    #[serde(default)]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub flight_duration: FlightDuration,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub hotel_nights: f64,
}

/// Business operations (organizations only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct OperationsInput {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub employees: f64,
    /// Office floor area
    #[serde(default, deserialize_with = "lenient_f64")]
    pub office_space: f64,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub data_center: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub manufacturing: bool,
}

/// Suppliers and logistics (organizations only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct SupplyChainInput {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub suppliers: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub shipping_distance: f64,
    #[serde(default)]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub packaging: PackagingType,
}

/// Everything the estimator reads, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ActivityInput {
    #[serde(default)]
    pub energy: EnergyInput,
    #[serde(default)]
    pub transportation: TransportationInput,
    #[serde(default)]
    pub diet: DietInput,
    #[serde(default)]
    pub travel: TravelInput,
    #[serde(default)]
    pub operations: OperationsInput,
    #[serde(default)]
    pub supply_chain: SupplyChainInput,
}

// ============================================================================
// Flat form representation
// ============================================================================

/// Flat form keys accepted by [`ActivityInput::from_form`]
pub mod form_keys {
    pub const ELECTRICITY: &str = "electricity";
    pub const GAS: &str = "gas";
    pub const RENEWABLE_PERCENTAGE: &str = "renewablePercentage";
    pub const VEHICLE_TYPE: &str = "vehicleType";
    pub const FUEL_TYPE: &str = "fuelType";
    pub const MONTHLY_DISTANCE: &str = "monthlyDistance";
    pub const VEHICLE_EFFICIENCY: &str = "vehicleEfficiency";
    pub const VEHICLE_COUNT: &str = "vehicleCount";
    pub const PUBLIC_TRANSPORT_DISTANCE: &str = "publicTransportDistance";
    pub const WALKING_CYCLING_DISTANCE: &str = "walkingCyclingDistance";
    pub const DIET_TYPE: &str = "dietType";
    pub const RESTAURANT_MEALS_PER_WEEK: &str = "restaurantMealsPerWeek";
    pub const LOCAL_FOOD_PERCENTAGE: &str = "localFoodPercentage";
    pub const FLIGHTS_PER_YEAR: &str = "flightsPerYear";
    pub const FLIGHT_DURATION: &str = "flightDuration";
    pub const HOTEL_NIGHTS: &str = "hotelNights";
    pub const EMPLOYEES: &str = "employees";
    pub const OFFICE_SPACE: &str = "officeSpace";
    pub const DATA_CENTER: &str = "dataCenter";
    pub const MANUFACTURING: &str = "manufacturing";
    pub const SUPPLIERS: &str = "suppliers";
    pub const SHIPPING_DISTANCE: &str = "shippingDistance";
    pub const PACKAGING: &str = "packaging";

    /// Every key, in form order
    pub const ALL: [&str; 23] = [
        ELECTRICITY,
        GAS,
        RENEWABLE_PERCENTAGE,
        VEHICLE_TYPE,
        FUEL_TYPE,
        MONTHLY_DISTANCE,
        VEHICLE_EFFICIENCY,
        VEHICLE_COUNT,
        PUBLIC_TRANSPORT_DISTANCE,
        WALKING_CYCLING_DISTANCE,
        DIET_TYPE,
        RESTAURANT_MEALS_PER_WEEK,
        LOCAL_FOOD_PERCENTAGE,
        FLIGHTS_PER_YEAR,
        FLIGHT_DURATION,
        HOTEL_NIGHTS,
        EMPLOYEES,
        OFFICE_SPACE,
        DATA_CENTER,
        MANUFACTURING,
        SUPPLIERS,
        SHIPPING_DISTANCE,
        PACKAGING,
    ];

    pub fn is_known(key: &str) -> bool {
        ALL.contains(&key)
    }
}

impl ActivityInput {
    /// Build an input from flat form state.
    ///
    /// Missing keys behave like empty fields. Numeric values use the
    /// parse-or-zero rule, checkboxes use the truthy rule and enums fall
    /// back to their baseline.
    pub fn from_form(form: &BTreeMap<String, String>) -> Self {
        use form_keys as k;

        let text = |key: &str| form.get(key).map_or("", String::as_str);
        let number = |key: &str| parse_or_zero(text(key));
        let flag = |key: &str| is_truthy(text(key));

        Self {
            energy: EnergyInput {
                electricity: number(k::ELECTRICITY),
                gas: number(k::GAS),
                renewable_percentage: number(k::RENEWABLE_PERCENTAGE),
            },
            transportation: TransportationInput {
                vehicle_type: VehicleType::from_str_or_default(text(k::VEHICLE_TYPE)),
                fuel_type: FuelType::from_str_or_default(text(k::FUEL_TYPE)),
                monthly_distance: number(k::MONTHLY_DISTANCE),
                vehicle_efficiency: number(k::VEHICLE_EFFICIENCY),
                vehicle_count: number(k::VEHICLE_COUNT),
                public_transport_distance: number(k::PUBLIC_TRANSPORT_DISTANCE),
                walking_cycling_distance: number(k::WALKING_CYCLING_DISTANCE),
            },
            diet: DietInput {
                diet_type: DietType::from_selection(text(k::DIET_TYPE)),
                restaurant_meals_per_week: number(k::RESTAURANT_MEALS_PER_WEEK),
                local_food_percentage: number(k::LOCAL_FOOD_PERCENTAGE),
            },
            travel: TravelInput {
                flights_per_year: number(k::FLIGHTS_PER_YEAR),
                flight_duration: FlightDuration::from_str_or_default(text(k::FLIGHT_DURATION)),
                hotel_nights: number(k::HOTEL_NIGHTS),
            },
            operations: OperationsInput {
                employees: number(k::EMPLOYEES),
                office_space: number(k::OFFICE_SPACE),
                data_center: flag(k::DATA_CENTER),
                manufacturing: flag(k::MANUFACTURING),
            },
            supply_chain: SupplyChainInput {
                suppliers: number(k::SUPPLIERS),
                shipping_distance: number(k::SHIPPING_DISTANCE),
                packaging: PackagingType::from_str_or_default(text(k::PACKAGING)),
            },
        }
    }
}
