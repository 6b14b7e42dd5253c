//! Common test utilities and helpers for bikeshare tests
//!
//! This module provides a trip builder and CSV fixture writers so the
//! integration tests can build small city datasets on disk.

use bikeshare::{
    data_loader::DataLoader,
    types::{City, Trip, parse_timestamp},
};
use chrono::TimeDelta;
use std::fmt::Write as _;
use std::fs;
use tempfile::TempDir;

/// Common test stations
pub const TEST_STATIONS: &[&str] = &[
    "Streeter Dr & Grand Ave",
    "Lake Shore Dr & Monroe St",
    "Clinton St & Washington Blvd",
    "Canal St & Adams St",
];

/// Builder for creating test Trip instances
pub struct TripBuilder {
    row: usize,
    start: String,
    minutes: i64,
    start_station: String,
    end_station: String,
    user_type: Option<String>,
    gender: Option<String>,
    birth_year: Option<i32>,
}

impl TripBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            row: 0,
            start: "2017-01-02 08:00:00".to_string(),
            minutes: 10,
            start_station: TEST_STATIONS[0].to_string(),
            end_station: TEST_STATIONS[1].to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }

    pub fn with_start(mut self, start: &str) -> Self {
        self.start = start.to_string();
        self
    }

    pub fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn with_stations(mut self, start: &str, end: &str) -> Self {
        self.start_station = start.to_string();
        self.end_station = end.to_string();
        self
    }

    #[allow(dead_code)]
    pub fn with_user_type(mut self, user_type: Option<&str>) -> Self {
        self.user_type = user_type.map(str::to_string);
        self
    }

    #[allow(dead_code)]
    pub fn with_gender(mut self, gender: Option<&str>) -> Self {
        self.gender = gender.map(str::to_string);
        self
    }

    #[allow(dead_code)]
    pub fn with_birth_year(mut self, year: Option<i32>) -> Self {
        self.birth_year = year;
        self
    }

    pub fn build(self) -> Trip {
        let start_time = parse_timestamp(&self.start).unwrap();
        let mut trip = Trip::new(
            self.row,
            start_time,
            start_time + TimeDelta::minutes(self.minutes),
            self.start_station,
            self.end_station,
        );
        trip.user_type = self.user_type;
        trip.gender = self.gender;
        trip.birth_year = self.birth_year;
        trip
    }
}

impl Default for TripBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The three-trip scenario: Jan-Mon-08:00, Jan-Mon-09:00, Feb-Tue-10:00
/// lasting 10, 20 and 30 minutes
pub fn scenario_trips() -> Vec<Trip> {
    vec![
        TripBuilder::new()
            .with_row(0)
            .with_start("2017-01-02 08:00:00")
            .with_minutes(10)
            .build(),
        TripBuilder::new()
            .with_row(1)
            .with_start("2017-01-02 09:00:00")
            .with_minutes(20)
            .build(),
        TripBuilder::new()
            .with_row(2)
            .with_start("2017-02-07 10:00:00")
            .with_minutes(30)
            .with_stations(TEST_STATIONS[2], TEST_STATIONS[3])
            .build(),
    ]
}

/// Render trips as a city CSV the way the source files lay it out
pub fn to_csv(city: City, trips: &[Trip]) -> String {
    let mut csv = String::from(",Start Time,End Time,Trip Duration,Start Station,End Station,User Type");
    if city.has_demographics() {
        csv.push_str(",Gender,Birth Year");
    }
    csv.push('\n');

    for trip in trips {
        write!(
            csv,
            "{},{},{},{},\"{}\",\"{}\",{}",
            1000 + trip.row,
            trip.start_time.format("%Y-%m-%d %H:%M:%S"),
            trip.end_time.format("%Y-%m-%d %H:%M:%S"),
            trip.duration().num_seconds(),
            trip.start_station,
            trip.end_station,
            trip.user_type.as_deref().unwrap_or("")
        )
        .unwrap();
        if city.has_demographics() {
            write!(
                csv,
                ",{},{}",
                trip.gender.as_deref().unwrap_or(""),
                trip.birth_year
                    .map(|year| format!("{year}.0"))
                    .unwrap_or_default()
            )
            .unwrap();
        }
        csv.push('\n');
    }
    csv
}

/// A temporary data directory holding city CSV files
pub struct TestData {
    pub dir: TempDir,
}

impl TestData {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `trips` as the dataset of `city`
    pub fn with_city(self, city: City, trips: &[Trip]) -> Self {
        fs::write(self.dir.path().join(city.data_file()), to_csv(city, trips)).unwrap();
        self
    }

    /// Write raw CSV text as the dataset of `city`
    #[allow(dead_code)]
    pub fn with_raw(self, city: City, content: &str) -> Self {
        fs::write(self.dir.path().join(city.data_file()), content).unwrap();
        self
    }

    pub fn loader(&self) -> DataLoader {
        DataLoader::new(self.dir.path())
    }
}

impl Default for TestData {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` trips, one hour apart starting 2017-01-01 00:00 (a Sunday),
/// cycling through the test stations and user types
#[allow(dead_code)]
pub fn hourly_trips(count: usize) -> Vec<Trip> {
    let user_types = ["Subscriber", "Customer"];
    let genders = [Some("Male"), Some("Female"), None];
    let base = parse_timestamp("2017-01-01 00:00:00").unwrap();

    (0..count)
        .map(|i| {
            let start = base + TimeDelta::hours(i as i64);
            TripBuilder::new()
                .with_row(i)
                .with_start(&start.format("%Y-%m-%d %H:%M:%S").to_string())
                .with_minutes(5 + (i % 7) as i64)
                .with_stations(
                    TEST_STATIONS[i % TEST_STATIONS.len()],
                    TEST_STATIONS[(i + 1) % TEST_STATIONS.len()],
                )
                .with_user_type(Some(user_types[i % 2]))
                .with_gender(genders[i % 3])
                .with_birth_year((i % 5 != 0).then_some(1960 + (i % 40) as i32))
                .build()
        })
        .collect()
}
