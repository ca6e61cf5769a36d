//! Configuration loading
//!
//! Provides functions to load application configuration from the
//! environment, from files, or from built-in defaults.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
