//! Integration tests for calculator input types
//!
//! Covers the two ways input reaches the estimator: flat form state and
//! JSON documents sent by a client.

use std::collections::BTreeMap;

use carbonwise_domain::{
    form_keys, ActivityInput, DietType, FlightDuration, FuelType, PackagingType, SubjectKind,
    VehicleType,
};

fn form(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// A household fills in the individual tabs with a mix of clean and messy
/// values.
#[test]
fn test_individual_form_with_messy_values() {
    let input = ActivityInput::from_form(&form(&[
        (form_keys::ELECTRICITY, " 320 "),
        (form_keys::GAS, "12 therms"),
        (form_keys::RENEWABLE_PERCENTAGE, ""),
        (form_keys::FUEL_TYPE, "Hybrid"),
        (form_keys::VEHICLE_TYPE, "spaceship"),
        (form_keys::MONTHLY_DISTANCE, "1,200"),
        (form_keys::DIET_TYPE, "vegetarian"),
        (form_keys::RESTAURANT_MEALS_PER_WEEK, "3"),
        (form_keys::LOCAL_FOOD_PERCENTAGE, "40%"),
        (form_keys::FLIGHT_DURATION, "medium"),
        (form_keys::HOTEL_NIGHTS, "-"),
    ]));

    assert_eq!(input.energy.electricity, 320.0);
    assert_eq!(input.energy.gas, 12.0);
    assert_eq!(input.energy.renewable_percentage, 0.0);
    assert_eq!(input.transportation.fuel_type, FuelType::Hybrid);
    assert_eq!(input.transportation.vehicle_type, VehicleType::Car);
    // Thousands separators stop the numeric prefix
    assert_eq!(input.transportation.monthly_distance, 1.0);
    assert_eq!(input.diet.diet_type, Some(DietType::Vegetarian));
    assert_eq!(input.diet.restaurant_meals_per_week, 3.0);
    assert_eq!(input.diet.local_food_percentage, 40.0);
    assert_eq!(input.travel.flight_duration, FlightDuration::Medium);
    assert_eq!(input.travel.hotel_nights, 0.0);
}

/// A business posts a JSON document where numbers arrive as strings, as
/// they do from HTML inputs.
#[test]
fn test_organization_json_document() {
    let input: ActivityInput = serde_json::from_str(
        r#"{
            "energy": {"electricity": "5000", "gas": "250", "renewablePercentage": "30"},
            "transportation": {
                "vehicleType": "light", "fuelType": "diesel",
                "monthlyDistance": 1500, "vehicleEfficiency": "12", "vehicleCount": 25
            },
            "travel": {"flightsPerYear": 40, "flightDuration": "short", "hotelNights": 60},
            "operations": {"employees": "150", "officeSpace": "25000",
                           "dataCenter": true, "manufacturing": "false"},
            "supplyChain": {"suppliers": 45, "shippingDistance": "2500", "packaging": "mixed"},
            "unknownSection": {"ignored": true}
        }"#,
    )
    .expect("document should deserialize");

    assert_eq!(input.energy.gas, 250.0);
    assert_eq!(input.transportation.vehicle_type, VehicleType::Light);
    assert_eq!(input.transportation.vehicle_efficiency, 12.0);
    assert_eq!(input.transportation.vehicle_count, 25.0);
    assert_eq!(input.travel.flight_duration, FlightDuration::Short);
    assert_eq!(input.operations.employees, 150.0);
    assert!(input.operations.data_center);
    assert!(!input.operations.manufacturing);
    assert_eq!(input.supply_chain.packaging, PackagingType::Mixed);
    assert_eq!(input.diet.diet_type, None);
    assert!(input.diet.is_blank());
}

/// Serializing then reading back keeps the camelCase wire shape the remote
/// API expects.
#[test]
fn test_serialized_shape_uses_form_keys() {
    let mut input = ActivityInput::default();
    input.energy.renewable_percentage = 20.0;
    input.transportation.public_transport_distance = 500.0;

    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(json["energy"]["renewablePercentage"], 20.0);
    assert_eq!(json["transportation"]["publicTransportDistance"], 500.0);
    assert_eq!(json["transportation"]["fuelType"], "petrol");
    assert_eq!(json["supplyChain"]["packaging"], "conventional");
    assert_eq!(json["travel"]["flightDuration"], "unspecified");
}

#[test]
fn test_subject_kind_parsing() {
    assert_eq!(SubjectKind::from_str_or_default("individual"), SubjectKind::Individual);
    assert_eq!(SubjectKind::from_str_or_default("Business"), SubjectKind::Organization);
    assert_eq!(SubjectKind::from_str_or_default("???"), SubjectKind::Organization);
    assert!("alien".parse::<SubjectKind>().is_err());
}
