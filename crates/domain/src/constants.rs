//! Emission factors and other domain constants
//!
//! All factors are kilograms of CO2e per unit unless the name ends in
//! `_TONS`. Conversions to tons happen in the estimator.

pub const KG_PER_TON: f64 = 1000.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

// Energy
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.4;
pub const GAS_KG_PER_THERM: f64 = 5.3;

// Vehicle fuel, per litre (or kWh for electric)
pub const PETROL_KG_PER_UNIT: f64 = 2.31;
pub const DIESEL_KG_PER_UNIT: f64 = 2.68;
pub const ELECTRIC_KG_PER_UNIT: f64 = 0.5;
pub const HYBRID_KG_PER_UNIT: f64 = 1.5;

// Vehicle class multipliers
pub const CAR_MULTIPLIER: f64 = 1.0;
pub const LIGHT_VEHICLE_MULTIPLIER: f64 = 1.5;
pub const HEAVY_VEHICLE_MULTIPLIER: f64 = 3.0;

// Sustainable-mode credit, per km
pub const PUBLIC_TRANSPORT_CREDIT_KG_PER_KM: f64 = 0.08;
pub const WALK_CYCLE_CREDIT_KG_PER_KM: f64 = 0.12;

// Diet, daily baseline
pub const VEGAN_KG_PER_DAY: f64 = 1.5;
pub const VEGETARIAN_KG_PER_DAY: f64 = 1.7;
pub const LOW_MEAT_KG_PER_DAY: f64 = 2.0;
pub const MEDIUM_MEAT_KG_PER_DAY: f64 = 2.5;
pub const HIGH_MEAT_KG_PER_DAY: f64 = 3.3;
pub const MIXED_DIET_KG_PER_DAY: f64 = 2.5;
pub const MEALS_PER_WEEK: f64 = 21.0;
pub const RESTAURANT_MEAL_UPLIFT: f64 = 0.5;
pub const LOCAL_FOOD_DISCOUNT: f64 = 0.3;

// Air travel
pub const SHORT_FLIGHT_TONS: f64 = 0.25;
pub const MEDIUM_FLIGHT_TONS: f64 = 0.5;
pub const LONG_FLIGHT_TONS: f64 = 1.0;
pub const UNSPECIFIED_FLIGHT_TONS: f64 = 0.4;
pub const HOTEL_NIGHT_TONS: f64 = 0.02;

// Operations, tons per year
pub const EMPLOYEE_TONS: f64 = 2.5;
pub const OFFICE_AREA_TONS: f64 = 0.02;
pub const DATA_CENTER_EMPLOYEE_TONS: f64 = 1.2;
pub const MANUFACTURING_AREA_TONS: f64 = 0.05;

// Supply chain, tons per year
pub const SUPPLIER_TONS: f64 = 15.0;
pub const SHIPPING_DISTANCE_TONS: f64 = 0.1;
pub const RECYCLED_PACKAGING_FACTOR: f64 = 0.7;
pub const MIXED_PACKAGING_FACTOR: f64 = 0.85;
pub const CONVENTIONAL_PACKAGING_FACTOR: f64 = 1.0;

// Offsetting
pub const OFFSET_PRICE_USD_PER_TON: f64 = 20.0;

// Remote calculation
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_SESSION_PATH: &str = ".carbonwise/session.json";
/// Allowed gap between a remote total and its category sum. The server
/// rounds every figure to two decimals independently.
pub const REMOTE_TOTAL_TOLERANCE_TONS: f64 = 0.05;
