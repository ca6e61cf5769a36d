//! # Carbonwise App
//!
//! Application layer: command handlers, dependency wiring and the
//! `carbonwise` command-line entry point.
//!
//! This crate contains:
//! - Commands (calculate, sign in and out, status, history)
//! - Application context (dependency injection)
//! - Logging setup and command helpers
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the ports in `core` to the adapters in `infra`

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
