//! # Carbonwise Domain
//!
//! Business domain types and models for Carbonwise.
//!
//! This crate contains:
//! - Calculator input and result types (ActivityInput, EmissionsBreakdown, etc.)
//! - Emission factors and other constants
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Parse-or-zero helpers for loosely typed form values
//!
//! ## Architecture
//! - No dependencies on other Carbonwise crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
