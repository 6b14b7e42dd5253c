//! Core domain types for bikeshare
//!
//! This module contains the fundamental types used throughout the bikeshare
//! library: the city registry, the raw CSV row shape, the loaded trip record
//! with its derived columns, and a duration wrapper with pandas-style display.

use crate::error::{BikeshareError, Result};
use chrono::{Datelike, Month, NaiveDateTime, TimeDelta, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp layouts accepted for `Start Time` / `End Time`.
///
/// `%.f` makes the fractional part optional when parsing.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// One of the three cities with a backing dataset
///
/// The registry is fixed: each city maps to one CSV file name, and only
/// Chicago and New York City carry gender and birth-year columns.
///
/// # Examples
/// ```
/// use bikeshare_core::types::City;
/// use std::str::FromStr;
///
/// let city = City::from_str("New York City").unwrap();
/// assert_eq!(city, City::NewYorkCity);
/// assert_eq!(city.data_file(), "new_york_city.csv");
/// assert!(!City::Washington.has_demographics());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    /// Every registered city, in prompt order
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name as typed at the prompt
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Title-cased name for report headings
    pub fn display_name(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// File name of the city's dataset inside the data directory
    pub fn data_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Whether the city's dataset carries `Gender` and `Birth Year`
    pub fn has_demographics(&self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.name() == lowered)
            .ok_or_else(|| BikeshareError::UnknownCity(s.to_string()))
    }
}

/// Full English name of a weekday ("Monday", ...)
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English name of a 1-based month number, if it is one
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Parse a `Start Time` / `End Time` cell
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| BikeshareError::InvalidTimestamp(value.to_string()))
}

/// One CSV row as it appears in a city dataset
///
/// Every column the datasets carry is named here. `Gender` and `Birth Year`
/// are absent from the Washington file and default to `None`; empty cells and
/// missing columns deserialize to `None` as well.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTrip {
    /// The leading column with an empty header
    #[serde(rename = "", default)]
    pub id: Option<u64>,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    /// Seconds, as recorded by the operator
    #[serde(rename = "Trip Duration", default)]
    pub trip_duration: Option<f64>,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    /// Written as `1992.0` in the source files
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// A loaded bike trip with its derived time columns
///
/// `month`, `weekday` and `hour` are computed from `start_time` once, when the
/// trip is built, and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// 0-based position of the row in the source file
    pub row: usize,
    /// Value of the unnamed leading column
    pub id: Option<u64>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// `Trip Duration` column in seconds; [`Trip::duration`] is derived from
    /// the timestamps instead
    pub trip_duration: Option<f64>,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// 1-12
    pub month: u32,
    pub weekday: Weekday,
    /// 0-23
    pub hour: u32,
}

impl Trip {
    /// Build a trip and its derived columns
    pub fn new(
        row: usize,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            row,
            id: None,
            start_time,
            end_time,
            trip_duration: None,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_trip_duration(mut self, seconds: f64) -> Self {
        self.trip_duration = Some(seconds);
        self
    }

    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    /// Convert a raw CSV row, parsing timestamps and deriving time columns
    pub fn from_raw(row: usize, raw: RawTrip) -> Result<Self> {
        let start_time = parse_timestamp(&raw.start_time)?;
        let end_time = parse_timestamp(&raw.end_time)?;

        let mut trip = Self::new(
            row,
            start_time,
            end_time,
            raw.start_station,
            raw.end_station,
        );
        trip.id = raw.id;
        trip.trip_duration = raw.trip_duration;
        trip.user_type = raw.user_type;
        trip.gender = raw.gender;
        trip.birth_year = raw.birth_year.map(|year| year.round() as i32);
        Ok(trip)
    }

    /// Travel time of the trip (end minus start)
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Start and end station joined into one route label
    pub fn route(&self) -> String {
        format!("{} TO {}", self.start_station, self.end_station)
    }

    /// Weekday as a full English name
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Duration with pandas-style display (`0 days 00:20:00`)
///
/// # Examples
/// ```
/// use bikeshare_core::types::TripDuration;
/// use chrono::TimeDelta;
///
/// let total = TripDuration::new(TimeDelta::minutes(1530));
/// assert_eq!(total.to_string(), "1 days 01:30:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TripDuration(TimeDelta);

impl TripDuration {
    pub fn new(delta: TimeDelta) -> Self {
        Self(delta)
    }

    pub fn inner(&self) -> TimeDelta {
        self.0
    }

    /// Seconds including the fractional part
    pub fn as_secs_f64(&self) -> f64 {
        self.0.num_seconds() as f64 + f64::from(self.0.subsec_nanos()) / 1e9
    }

    /// Sum of all durations
    pub fn total<I>(durations: I) -> Self
    where
        I: IntoIterator<Item = TimeDelta>,
    {
        let nanos = durations.into_iter().map(total_nanos).sum();
        Self(from_nanos(nanos))
    }

    /// Arithmetic mean, or `None` for an empty input
    pub fn mean<I>(durations: I) -> Option<Self>
    where
        I: IntoIterator<Item = TimeDelta>,
    {
        let (sum, count) = durations
            .into_iter()
            .fold((0i128, 0i128), |(sum, count), d| (sum + total_nanos(d), count + 1));
        if count == 0 {
            return None;
        }
        Some(Self(from_nanos(sum / count)))
    }
}

fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * 1_000_000_000 + i128::from(delta.subsec_nanos())
}

fn from_nanos(nanos: i128) -> TimeDelta {
    let secs = (nanos / 1_000_000_000) as i64;
    let rem = (nanos % 1_000_000_000) as i64;
    TimeDelta::try_seconds(secs)
        .map(|d| d + TimeDelta::nanoseconds(rem))
        .unwrap_or(TimeDelta::MAX)
}

impl fmt::Display for TripDuration {
    /// Days are floored, so the clock part is always the non-negative
    /// remainder: -90 seconds is `-1 days +23:58:30`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NANOS_PER_SEC: i128 = 1_000_000_000;
        const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SEC;

        let nanos = total_nanos(self.0);
        let days = nanos.div_euclid(NANOS_PER_DAY);
        let rem = nanos.rem_euclid(NANOS_PER_DAY);
        let secs = rem / NANOS_PER_SEC;
        let clock_sign = if days < 0 { "+" } else { "" };

        write!(
            f,
            "{} days {}{:02}:{:02}:{:02}",
            days,
            clock_sign,
            secs / 3600,
            secs % 3600 / 60,
            secs % 60
        )?;
        let micros = rem % NANOS_PER_SEC / 1_000;
        if micros != 0 {
            write!(f, ".{micros:06}")?;
        }
        Ok(())
    }
}
