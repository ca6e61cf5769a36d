//! Domain types and models

pub mod activity;
pub mod emissions;
pub mod history;
pub mod session;

pub use activity::{
    form_keys, ActivityInput, DietInput, DietType, EnergyInput, FlightDuration, FuelType,
    OperationsInput, PackagingType, SubjectKind, SupplyChainInput, TransportationInput,
    TravelInput, VehicleType,
};
pub use emissions::{
    offset_cost_usd, CalculationOutcome, CalculationSource, EmissionCategory,
    EmissionsBreakdown, FootprintReport, ReportedBreakdown,
};
pub use history::CalculationRecord;
pub use session::{BusinessIdentity, BusinessRegistration, Credentials, Session, TokenGrant};
