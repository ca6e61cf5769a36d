//! Pure helpers for turning loosely typed form values into numbers

pub mod lenient;
pub mod numeric;

pub use numeric::{finite_or_zero, is_truthy, parse_or_zero};
