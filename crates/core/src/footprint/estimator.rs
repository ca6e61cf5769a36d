//! Carbon-footprint estimator
//!
//! Pure arithmetic over [`ActivityInput`]. No I/O, no failure modes: input
//! values have already been through the parse-or-zero rule, and every
//! category is clamped at zero when the breakdown is assembled.
//!
//! Per-category functions return tons CO2e per year and are public so the
//! results panel can explain a single figure.

use carbonwise_domain::constants::{
    DATA_CENTER_EMPLOYEE_TONS, DAYS_PER_YEAR, ELECTRICITY_KG_PER_KWH, EMPLOYEE_TONS,
    GAS_KG_PER_THERM, HOTEL_NIGHT_TONS, KG_PER_TON, LOCAL_FOOD_DISCOUNT,
    MANUFACTURING_AREA_TONS, MEALS_PER_WEEK, MONTHS_PER_YEAR, OFFICE_AREA_TONS,
    PUBLIC_TRANSPORT_CREDIT_KG_PER_KM, RESTAURANT_MEAL_UPLIFT, SHIPPING_DISTANCE_TONS,
    SUPPLIER_TONS, WALK_CYCLE_CREDIT_KG_PER_KM,
};
use carbonwise_domain::{
    ActivityInput, DietInput, EmissionsBreakdown, EnergyInput, OperationsInput, SubjectKind,
    SupplyChainInput, TransportationInput, TravelInput,
};

/// Estimate annual emissions for `input` as seen for `subject`.
///
/// Diet applies to individuals only; operations and supply chain apply to
/// organizations only. Energy, transportation and travel apply to both.
pub fn estimate(input: &ActivityInput, subject: SubjectKind) -> EmissionsBreakdown {
    let energy = energy_emissions(&input.energy);
    let transportation = transportation_emissions(&input.transportation);
    let travel = travel_emissions(&input.travel);

    let (diet, operations, supply_chain) = match subject {
        SubjectKind::Individual => (diet_emissions(&input.diet), 0.0, 0.0),
        SubjectKind::Organization => (
            0.0,
            operations_emissions(&input.operations),
            supply_chain_emissions(&input.supply_chain),
        ),
    };

    EmissionsBreakdown::from_categories(
        energy,
        transportation,
        diet,
        travel,
        operations,
        supply_chain,
    )
}

/// Electricity and gas, discounted by the renewable share.
///
/// The renewable share discounts the gas term as well as electricity.
pub fn energy_emissions(energy: &EnergyInput) -> f64 {
    let kg = energy.electricity * ELECTRICITY_KG_PER_KWH + energy.gas * GAS_KG_PER_THERM;
    let non_renewable = 1.0 - energy.renewable_percentage / 100.0;
    kg * non_renewable / KG_PER_TON
}

/// Vehicle emissions minus the sustainable-mode credit, floored at zero.
pub fn transportation_emissions(transport: &TransportationInput) -> f64 {
    let vehicle = vehicle_emissions(transport);

    if transport.public_transport_distance > 0.0 || transport.walking_cycling_distance > 0.0 {
        (vehicle - sustainable_mode_credit(transport)).max(0.0)
    } else {
        vehicle
    }
}

/// Annual fuel-burn emissions of the fleet (stage one of transportation).
///
/// Zero unless distance, efficiency and vehicle count are all positive.
pub fn vehicle_emissions(transport: &TransportationInput) -> f64 {
    let TransportationInput {
        monthly_distance, vehicle_efficiency, vehicle_count, fuel_type, vehicle_type, ..
    } = *transport;

    if monthly_distance <= 0.0 || vehicle_efficiency <= 0.0 || vehicle_count <= 0.0 {
        return 0.0;
    }

    let fuel_consumed = monthly_distance * vehicle_count / vehicle_efficiency;
    let monthly_kg = fuel_consumed * fuel_type.kg_per_unit() * vehicle_type.class_multiplier();
    monthly_kg * MONTHS_PER_YEAR / KG_PER_TON
}

/// Tons credited for distance moved to public transport or walking/cycling
/// (stage two of transportation).
pub fn sustainable_mode_credit(transport: &TransportationInput) -> f64 {
    transport.public_transport_distance * PUBLIC_TRANSPORT_CREDIT_KG_PER_KM / KG_PER_TON
        + transport.walking_cycling_distance * WALK_CYCLE_CREDIT_KG_PER_KM / KG_PER_TON
}

/// Food emissions for one person. A blank diet section is zero.
pub fn diet_emissions(diet: &DietInput) -> f64 {
    if diet.is_blank() {
        return 0.0;
    }

    let restaurant =
        1.0 + (diet.restaurant_meals_per_week / MEALS_PER_WEEK) * RESTAURANT_MEAL_UPLIFT;
    let local = 1.0 - (diet.local_food_percentage / 100.0) * LOCAL_FOOD_DISCOUNT;
    diet.baseline().daily_kg() * restaurant * local * DAYS_PER_YEAR / KG_PER_TON
}

/// Flights plus hotel nights.
pub fn travel_emissions(travel: &TravelInput) -> f64 {
    travel.flights_per_year * travel.flight_duration.tons_per_flight()
        + travel.hotel_nights * HOTEL_NIGHT_TONS
}

/// Staff and floor space, with data-center and manufacturing surcharges.
pub fn operations_emissions(operations: &OperationsInput) -> f64 {
    let mut tons =
        operations.employees * EMPLOYEE_TONS + operations.office_space * OFFICE_AREA_TONS;
    if operations.data_center {
        tons += operations.employees * DATA_CENTER_EMPLOYEE_TONS;
    }
    if operations.manufacturing {
        tons += operations.office_space * MANUFACTURING_AREA_TONS;
    }
    tons.max(0.0)
}

/// Suppliers and shipping, scaled by packaging.
pub fn supply_chain_emissions(supply: &SupplyChainInput) -> f64 {
    (supply.suppliers * SUPPLIER_TONS + supply.shipping_distance * SHIPPING_DISTANCE_TONS)
        * supply.packaging.factor()
}
