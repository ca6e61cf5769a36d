//! # Carbonwise Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The footprint estimator and its recommendations
//! - Calculator form state and the remote-first calculation service
//! - The explicit session context
//! - Port interfaces (traits) for the remote API and session storage
//!
//! ## Architecture Principles
//! - Only depends on `carbonwise-domain`
//! - No HTTP, filesystem, or platform code
//! - All external dependencies via traits

pub mod calculator;
pub mod footprint;
pub mod session;

// Re-export the entry points callers need
pub use calculator::{
    validate_remote, CalculatorForm, FootprintService, RemoteCalculation, RemoteCalculator,
    RemoteFailure,
};
pub use footprint::{build_report, estimate, recommendations};
pub use session::{
    AccessTokenProvider, AuthGateway, InMemorySessionStore, SessionContext, SessionStore,
};
