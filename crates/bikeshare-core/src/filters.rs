//! Filtering module for trip records
//!
//! This module provides the month and day-of-week selections offered at the
//! prompt and a combined [`TripFilter`] that retains matching trips. Filters
//! only ever remove trips; they never reorder or modify the ones they keep.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::filters::{DayFilter, MonthFilter, TripFilter};
//! use std::str::FromStr;
//!
//! let filter = TripFilter::new()
//!     .with_month(MonthFilter::from_str("february").unwrap())
//!     .with_day(DayFilter::from_str("all").unwrap());
//! assert!(!filter.is_unrestricted());
//! ```

use crate::error::{BikeshareError, Result};
use crate::types::{City, Trip, weekday_name};
use chrono::{Month, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Months that can be selected; the datasets cover January to June
pub const SELECTABLE_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

/// Days of the week in prompt order
pub const SELECTABLE_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Month selection: a single month or all of them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl MonthFilter {
    /// Check if a trip's derived month matches
    pub fn matches(&self, trip: &Trip) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(month) => trip.month == month.number_from_month(),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(month) => f.write_str(&month.name().to_lowercase()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        if lowered == "all" {
            return Ok(MonthFilter::All);
        }
        SELECTABLE_MONTHS
            .into_iter()
            .find(|month| month.name().to_lowercase() == lowered)
            .map(MonthFilter::Only)
            .ok_or_else(|| {
                BikeshareError::InvalidArgument(format!(
                    "month must be january through june or all, got '{s}'"
                ))
            })
    }
}

impl Serialize for MonthFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Day-of-week selection: a single weekday or all of them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    /// Check if a trip's derived weekday matches
    pub fn matches(&self, trip: &Trip) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(day) => trip.weekday == *day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(day) => f.write_str(&weekday_name(*day).to_lowercase()),
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        if lowered == "all" {
            return Ok(DayFilter::All);
        }
        SELECTABLE_DAYS
            .into_iter()
            .find(|day| weekday_name(*day).to_lowercase() == lowered)
            .map(DayFilter::Only)
            .ok_or_else(|| {
                BikeshareError::InvalidArgument(format!(
                    "day must be monday through sunday or all, got '{s}'"
                ))
            })
    }
}

impl Serialize for DayFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Combined month and day filter for trips
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TripFilter {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl TripFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the month filter
    pub fn with_month(mut self, month: MonthFilter) -> Self {
        self.month = month;
        self
    }

    /// Set the day filter
    pub fn with_day(mut self, day: DayFilter) -> Self {
        self.day = day;
        self
    }

    /// True when neither month nor day restricts the data
    pub fn is_unrestricted(&self) -> bool {
        self.month == MonthFilter::All && self.day == DayFilter::All
    }

    /// Check if a trip passes both filters
    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.matches(trip) && self.day.matches(trip)
    }

    /// Keep only matching trips, preserving their order
    pub fn apply(&self, mut trips: Vec<Trip>) -> Vec<Trip> {
        if self.is_unrestricted() {
            return trips;
        }
        let before = trips.len();
        trips.retain(|trip| self.matches(trip));
        debug!(
            "Filter month={} day={} kept {} of {} trips",
            self.month,
            self.day,
            trips.len(),
            before
        );
        trips
    }
}

/// A city together with its month and day selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Selection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// The trip filter for this selection's month and day
    pub fn filter(&self) -> TripFilter {
        TripFilter::new().with_month(self.month).with_day(self.day)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (month: {}, day: {})",
            self.city.display_name(),
            self.month,
            self.day
        )
    }
}
