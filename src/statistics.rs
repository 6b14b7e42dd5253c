//! Statistics module for summarizing filtered trips
//!
//! This module turns a filtered trip list into the four report sections:
//! popular travel times, popular stations, trip durations, and user
//! breakdowns. Every aggregate here skips absent values explicitly and
//! returns `None` for an empty input instead of inventing a value.
//!
//! # Tie-breaking
//!
//! [`mode`] counts values in an ordered map and keeps the first value with the
//! highest count, so among tied values the smallest one wins: months and hours
//! numerically, weekdays Monday-first, text lexicographically.
//!
//! # Examples
//!
//! ```
//! use bikeshare::statistics::{mode, value_counts};
//!
//! let popular = mode([9, 8, 10, 8, 9]).unwrap();
//! assert_eq!((popular.value, popular.count), (8, 2));
//!
//! let counts = value_counts(["Subscriber", "Customer", "Subscriber"]);
//! assert_eq!(counts[0].value, "Subscriber");
//! ```

use crate::types::{City, Trip, TripDuration};
use chrono::Weekday;
use std::collections::BTreeMap;
use std::time::Duration;

/// A value together with how many times it occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popular<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Popular<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Popular<U> {
        Popular {
            value: f(self.value),
            count: self.count,
        }
    }
}

fn tally<T, I>(values: I) -> BTreeMap<T, usize>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value, smallest value first among ties
///
/// Returns `None` when `values` is empty.
pub fn mode<T, I>(values: I) -> Option<Popular<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<Popular<T>> = None;
    for (value, count) in tally(values) {
        let better = match &best {
            Some(current) => count > current.count,
            None => true,
        };
        if better {
            best = Some(Popular { value, count });
        }
    }
    best
}

/// Count of each distinct value, descending by count
///
/// Values with equal counts keep ascending value order.
pub fn value_counts<T, I>(values: I) -> Vec<Popular<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<Popular<T>> = tally(values)
        .into_iter()
        .map(|(value, count)| Popular { value, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// One computed report section and how long it took
#[derive(Debug, Clone, PartialEq)]
pub struct Section<T> {
    /// `None` when there were no trips to summarize
    pub stats: Option<T>,
    pub elapsed: Duration,
}

impl<T> Section<T> {
    /// Run `compute` and record its wall-clock time
    pub fn timed(compute: impl FnOnce() -> Option<T>) -> Self {
        let started = std::time::Instant::now();
        let stats = compute();
        Self {
            stats,
            elapsed: started.elapsed(),
        }
    }
}

/// Most frequent times of travel
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// Month number, 1-12
    pub month: Popular<u32>,
    pub weekday: Popular<Weekday>,
    /// Start hour, 0-23
    pub hour: Popular<u32>,
}

impl TimeStats {
    pub fn compute(trips: &[Trip]) -> Option<Self> {
        // Weekday has no ordering of its own; count by its Monday-based index
        let weekday = mode(trips.iter().map(|t| t.weekday.num_days_from_monday()))?
            .map(|index| weekday_from_index(index).unwrap_or(Weekday::Mon));

        Some(Self {
            month: mode(trips.iter().map(|t| t.month))?,
            weekday,
            hour: mode(trips.iter().map(|t| t.hour))?,
        })
    }
}

fn weekday_from_index(index: u32) -> Option<Weekday> {
    u8::try_from(index)
        .ok()
        .and_then(|i| Weekday::try_from(i).ok())
}

/// Most popular stations and route
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start_station: Popular<String>,
    pub end_station: Popular<String>,
    /// `"{start} TO {end}"`
    pub route: Popular<String>,
}

impl StationStats {
    pub fn compute(trips: &[Trip]) -> Option<Self> {
        Some(Self {
            start_station: mode(trips.iter().map(|t| t.start_station.as_str()))?
                .map(str::to_string),
            end_station: mode(trips.iter().map(|t| t.end_station.as_str()))?
                .map(str::to_string),
            route: mode(trips.iter().map(Trip::route))?,
        })
    }
}

/// Total and mean travel time
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total: TripDuration,
    pub mean: TripDuration,
    pub trips: usize,
}

impl DurationStats {
    pub fn compute(trips: &[Trip]) -> Option<Self> {
        let mean = TripDuration::mean(trips.iter().map(Trip::duration))?;
        Some(Self {
            total: TripDuration::total(trips.iter().map(Trip::duration)),
            mean,
            trips: trips.len(),
        })
    }
}

/// Earliest, most recent, and most common birth year
#[derive(Debug, Clone, PartialEq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Popular<i32>,
}

impl BirthYearStats {
    /// Aggregate the trips that carry a birth year; `None` if none do
    pub fn compute(trips: &[Trip]) -> Option<Self> {
        let years = || trips.iter().filter_map(|t| t.birth_year);
        Some(Self {
            earliest: years().min()?,
            most_recent: years().max()?,
            most_common: mode(years())?,
        })
    }
}

/// Gender and birth-year breakdown for cities that record them
#[derive(Debug, Clone, PartialEq)]
pub struct Demographics {
    /// Empty when no trip has a gender
    pub genders: Vec<Popular<String>>,
    pub birth_years: Option<BirthYearStats>,
}

impl Demographics {
    pub fn compute(trips: &[Trip]) -> Self {
        Self {
            genders: value_counts(trips.iter().filter_map(|t| t.gender.as_deref()))
                .into_iter()
                .map(|p| p.map(str::to_string))
                .collect(),
            birth_years: BirthYearStats::compute(trips),
        }
    }
}

/// User type counts plus demographics where the city has them
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<Popular<String>>,
    /// Always `None` for Washington, whose dataset has no such columns
    pub demographics: Option<Demographics>,
}

impl UserStats {
    pub fn compute(trips: &[Trip], city: City) -> Option<Self> {
        if trips.is_empty() {
            return None;
        }

        let user_types = value_counts(trips.iter().filter_map(|t| t.user_type.as_deref()))
            .into_iter()
            .map(|p| p.map(str::to_string))
            .collect();
        let demographics = city
            .has_demographics()
            .then(|| Demographics::compute(trips));

        Some(Self {
            user_types,
            demographics,
        })
    }
}
