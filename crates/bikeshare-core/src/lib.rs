//! Core types, errors, and filters for bikeshare
//!
//! This crate provides the city registry, the trip record with its derived
//! time columns, the month/day filters, and the error type shared by the
//! bikeshare binary crate. It performs no I/O.

pub mod error;
pub mod filters;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{BikeshareError, Result};
pub use filters::{DayFilter, MonthFilter, Selection, TripFilter};
pub use types::{City, RawTrip, Trip, TripDuration};
