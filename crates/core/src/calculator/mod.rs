//! Calculator page logic: form state and the remote-first calculation

pub mod form;
pub mod ports;
pub mod service;

pub use form::CalculatorForm;
pub use ports::{RemoteCalculation, RemoteCalculator};
pub use service::{validate_remote, FootprintService, RemoteFailure};
