//! Shared test utilities for unit tests
//!
//! Integration tests (in tests/) cannot access this module because it's
//! marked with #[cfg(test)]; they have their own helpers in
//! tests/common/mod.rs.

use crate::types::{Trip, parse_timestamp};
use chrono::TimeDelta;

/// Build a ten-minute trip between two fixed stations starting at `start`
pub fn trip_at(row: usize, start: &str) -> Trip {
    let start_time = parse_timestamp(start).expect("valid test timestamp");
    Trip::new(
        row,
        start_time,
        start_time + TimeDelta::minutes(10),
        "Station A",
        "Station B",
    )
}
