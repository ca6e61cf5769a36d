//! Footprint estimation
//!
//! The estimator is pure and synchronous; callers that want a remote result
//! go through [`crate::calculator::FootprintService`].

pub mod estimator;
pub mod recommendations;

pub use estimator::{
    diet_emissions, energy_emissions, estimate, operations_emissions, supply_chain_emissions,
    sustainable_mode_credit, transportation_emissions, travel_emissions, vehicle_emissions,
};
pub use recommendations::{build_report, recommendations};
