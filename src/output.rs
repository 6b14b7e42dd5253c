//! Output formatting module for bikeshare
//!
//! This module provides formatters for displaying report sections in
//! different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use bikeshare::output::get_formatter;
//! use bikeshare::statistics::{Section, TimeStats};
//!
//! let section: Section<TimeStats> = Section::timed(|| TimeStats::compute(&[]));
//!
//! let formatter = get_formatter(false, false);
//! assert!(formatter
//!     .format_time_stats(&section)
//!     .contains("No trips match the selected filters."));
//! ```

use crate::filters::Selection;
use crate::report::TripReport;
use crate::statistics::{DurationStats, Popular, Section, StationStats, TimeStats, UserStats};
use crate::types::{City, Trip, month_name, weekday_name};
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::{Value, json};
use std::time::Duration;

const NO_DATA: &str = "No trips match the selected filters.";

/// Trait for output formatters
///
/// Each report section is formatted on its own so the interactive session
/// can print a section as soon as it has been computed.
pub trait OutputFormatter {
    /// Title lines naming the selection and how many trips matched
    fn format_header(&self, selection: &Selection, trip_count: usize) -> String;

    /// Most frequent month, weekday and start hour
    fn format_time_stats(&self, section: &Section<TimeStats>) -> String;

    /// Most popular start station, end station and route
    fn format_station_stats(&self, section: &Section<StationStats>) -> String;

    /// Total and mean travel time
    fn format_duration_stats(&self, section: &Section<DurationStats>) -> String;

    /// User type counts and, where present, demographics
    fn format_user_stats(&self, section: &Section<UserStats>) -> String;

    /// A slice of raw trips with their derived columns
    fn format_raw_rows(&self, trips: &[Trip], city: City) -> String;

    /// A complete report in one piece
    fn format_report(&self, report: &TripReport) -> String;
}

/// Table formatter for human-readable output
///
/// Each section starts with a heading, shows its figures in a table, and ends
/// with the time the computation took and a dashed rule.
pub struct TableFormatter {
    /// Whether headings are colored
    pub color: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            format!("\n{}\n", text.bold().cyan())
        } else {
            format!("\n{text}\n")
        }
    }

    fn footer(elapsed: Duration) -> String {
        format!(
            "\nThis took {:.6} seconds.\n{}\n",
            elapsed.as_secs_f64(),
            "-".repeat(40)
        )
    }

    fn stats_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> "Statistic", b -> "Value", b -> "Count"]);
        table
    }

    fn counts_table(title: &str, counts: &[Popular<String>]) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> title, b -> "Count"]);
        for entry in counts {
            table.add_row(row![entry.value, r -> entry.count]);
        }
        table
    }

    fn section<T>(
        &self,
        heading: &str,
        section: &Section<T>,
        body: impl FnOnce(&T) -> String,
    ) -> String {
        let mut output = self.heading(heading);
        match &section.stats {
            Some(stats) => output.push_str(&body(stats)),
            None => {
                output.push_str(NO_DATA);
                output.push('\n');
            }
        }
        output.push_str(&Self::footer(section.elapsed));
        output
    }
}

impl OutputFormatter for TableFormatter {
    fn format_header(&self, selection: &Selection, trip_count: usize) -> String {
        format!(
            "{}Trips matching the selection: {}\n",
            self.heading(&format!("Bikeshare statistics for {selection}")),
            trip_count
        )
    }

    fn format_time_stats(&self, section: &Section<TimeStats>) -> String {
        self.section(
            "Calculating The Most Frequent Times of Travel...",
            section,
            |stats| {
                let mut table = Self::stats_table();
                table.add_row(row![
                    "Most common month",
                    month_name(stats.month.value).unwrap_or("Unknown"),
                    r -> stats.month.count
                ]);
                table.add_row(row![
                    "Most common day of week",
                    weekday_name(stats.weekday.value),
                    r -> stats.weekday.count
                ]);
                table.add_row(row![
                    "Most common start hour",
                    stats.hour.value,
                    r -> stats.hour.count
                ]);
                table.to_string()
            },
        )
    }

    fn format_station_stats(&self, section: &Section<StationStats>) -> String {
        self.section(
            "Calculating The Most Popular Stations and Trip...",
            section,
            |stats| {
                let mut table = Self::stats_table();
                table.add_row(row![
                    "Most common start station",
                    stats.start_station.value,
                    r -> stats.start_station.count
                ]);
                table.add_row(row![
                    "Most common end station",
                    stats.end_station.value,
                    r -> stats.end_station.count
                ]);
                table.add_row(row![
                    "Most frequent trip",
                    stats.route.value,
                    r -> stats.route.count
                ]);
                table.to_string()
            },
        )
    }

    fn format_duration_stats(&self, section: &Section<DurationStats>) -> String {
        self.section("Calculating Trip Duration...", section, |stats| {
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
            table.set_titles(row![b -> "Statistic", b -> "Duration"]);
            table.add_row(row!["Total travel time", r -> stats.total]);
            table.add_row(row!["Mean travel time", r -> stats.mean]);
            table.add_row(row!["Trips", r -> stats.trips]);
            table.to_string()
        })
    }

    fn format_user_stats(&self, section: &Section<UserStats>) -> String {
        self.section("Calculating User Stats...", section, |stats| {
            let mut output = String::from("Count of user types:\n");
            if stats.user_types.is_empty() {
                output.push_str("No user type data available.\n");
            } else {
                output.push_str(&Self::counts_table("User Type", &stats.user_types).to_string());
            }

            if let Some(demographics) = &stats.demographics {
                output.push_str("\nCount of gender:\n");
                if demographics.genders.is_empty() {
                    output.push_str("No gender data available.\n");
                } else {
                    output.push_str(&Self::counts_table("Gender", &demographics.genders).to_string());
                }

                output.push('\n');
                match &demographics.birth_years {
                    Some(years) => {
                        let mut table = Self::stats_table();
                        table.add_row(row!["Earliest birth year", years.earliest, ""]);
                        table.add_row(row!["Most recent birth year", years.most_recent, ""]);
                        table.add_row(row![
                            "Most common birth year",
                            years.most_common.value,
                            r -> years.most_common.count
                        ]);
                        output.push_str(&table.to_string());
                    }
                    None => output.push_str("No birth year data available.\n"),
                }
            }
            output
        })
    }

    fn format_raw_rows(&self, trips: &[Trip], city: City) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        if city.has_demographics() {
            table.set_titles(row![
                b -> "",
                b -> "Id",
                b -> "Start Time",
                b -> "End Time",
                b -> "Trip Duration",
                b -> "Start Station",
                b -> "End Station",
                b -> "User Type",
                b -> "Gender",
                b -> "Birth Year",
                b -> "month",
                b -> "day_of_week",
                b -> "hour"
            ]);
        } else {
            table.set_titles(row![
                b -> "",
                b -> "Id",
                b -> "Start Time",
                b -> "End Time",
                b -> "Trip Duration",
                b -> "Start Station",
                b -> "End Station",
                b -> "User Type",
                b -> "month",
                b -> "day_of_week",
                b -> "hour"
            ]);
        }

        for trip in trips {
            let start = trip.start_time.format("%Y-%m-%d %H:%M:%S");
            let end = trip.end_time.format("%Y-%m-%d %H:%M:%S");
            let id = or_nan(trip.id);
            let trip_duration = or_nan(trip.trip_duration);
            let user_type = trip.user_type.as_deref().unwrap_or("NaN");

            if city.has_demographics() {
                let birth_year = or_nan(trip.birth_year);
                table.add_row(row![
                    r -> trip.row,
                    r -> id,
                    start,
                    end,
                    r -> trip_duration,
                    trip.start_station,
                    trip.end_station,
                    user_type,
                    trip.gender.as_deref().unwrap_or("NaN"),
                    r -> birth_year,
                    r -> trip.month,
                    trip.day_name(),
                    r -> trip.hour
                ]);
            } else {
                table.add_row(row![
                    r -> trip.row,
                    r -> id,
                    start,
                    end,
                    r -> trip_duration,
                    trip.start_station,
                    trip.end_station,
                    user_type,
                    r -> trip.month,
                    trip.day_name(),
                    r -> trip.hour
                ]);
            }
        }

        table.to_string()
    }

    fn format_report(&self, report: &TripReport) -> String {
        let mut output = self.format_header(&report.selection, report.trip_count);
        output.push_str(&self.format_time_stats(&report.time));
        output.push_str(&self.format_station_stats(&report.stations));
        output.push_str(&self.format_duration_stats(&report.durations));
        output.push_str(&self.format_user_stats(&report.users));
        output
    }
}

fn or_nan<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

/// JSON formatter for machine-readable output
///
/// Sections without data serialize as `null`; elapsed times are in seconds.
pub struct JsonFormatter;

impl JsonFormatter {
    fn popular<T: serde::Serialize>(entry: &Popular<T>) -> Value {
        json!({ "value": entry.value, "count": entry.count })
    }

    fn section_json<T>(section: &Section<T>, body: impl FnOnce(&T) -> Value) -> Value {
        json!({
            "stats": section.stats.as_ref().map(body),
            "elapsed_seconds": section.elapsed.as_secs_f64(),
        })
    }

    fn time_json(section: &Section<TimeStats>) -> Value {
        Self::section_json(section, |stats| {
            json!({
                "month": {
                    "value": month_name(stats.month.value),
                    "count": stats.month.count,
                },
                "day_of_week": {
                    "value": weekday_name(stats.weekday.value),
                    "count": stats.weekday.count,
                },
                "hour": Self::popular(&stats.hour),
            })
        })
    }

    fn station_json(section: &Section<StationStats>) -> Value {
        Self::section_json(section, |stats| {
            json!({
                "start_station": Self::popular(&stats.start_station),
                "end_station": Self::popular(&stats.end_station),
                "trip": Self::popular(&stats.route),
            })
        })
    }

    fn duration_json(section: &Section<DurationStats>) -> Value {
        Self::section_json(section, |stats| {
            json!({
                "total": stats.total.to_string(),
                "total_seconds": stats.total.as_secs_f64(),
                "mean": stats.mean.to_string(),
                "mean_seconds": stats.mean.as_secs_f64(),
                "trips": stats.trips,
            })
        })
    }

    fn user_json(section: &Section<UserStats>) -> Value {
        Self::section_json(section, |stats| {
            let mut value = json!({
                "user_types": stats.user_types.iter().map(Self::popular).collect::<Vec<_>>(),
            });
            if let Some(demographics) = &stats.demographics {
                value["gender"] = json!(demographics
                    .genders
                    .iter()
                    .map(Self::popular)
                    .collect::<Vec<_>>());
                value["birth_year"] = match &demographics.birth_years {
                    Some(years) => json!({
                        "earliest": years.earliest,
                        "most_recent": years.most_recent,
                        "most_common": Self::popular(&years.most_common),
                    }),
                    None => Value::Null,
                };
            }
            value
        })
    }

    fn pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_header(&self, selection: &Selection, trip_count: usize) -> String {
        Self::pretty(&json!({ "selection": selection, "trips": trip_count }))
    }

    fn format_time_stats(&self, section: &Section<TimeStats>) -> String {
        Self::pretty(&Self::time_json(section))
    }

    fn format_station_stats(&self, section: &Section<StationStats>) -> String {
        Self::pretty(&Self::station_json(section))
    }

    fn format_duration_stats(&self, section: &Section<DurationStats>) -> String {
        Self::pretty(&Self::duration_json(section))
    }

    fn format_user_stats(&self, section: &Section<UserStats>) -> String {
        Self::pretty(&Self::user_json(section))
    }

    fn format_raw_rows(&self, trips: &[Trip], _city: City) -> String {
        let rows: Vec<Value> = trips
            .iter()
            .map(|trip| {
                json!({
                    "row": trip.row,
                    "id": trip.id,
                    "start_time": trip.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                    "end_time": trip.end_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                    "trip_duration": trip.trip_duration,
                    "start_station": trip.start_station,
                    "end_station": trip.end_station,
                    "user_type": trip.user_type,
                    "gender": trip.gender,
                    "birth_year": trip.birth_year,
                    "month": trip.month,
                    "day_of_week": trip.day_name(),
                    "hour": trip.hour,
                })
            })
            .collect();
        Self::pretty(&Value::Array(rows))
    }

    fn format_report(&self, report: &TripReport) -> String {
        Self::pretty(&json!({
            "selection": report.selection,
            "trips": report.trip_count,
            "time_stats": Self::time_json(&report.time),
            "station_stats": Self::station_json(&report.stations),
            "trip_duration_stats": Self::duration_json(&report.durations),
            "user_stats": Self::user_json(&report.users),
        }))
    }
}

/// Get the appropriate formatter based on output format preference
pub fn get_formatter(json: bool, color: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{DayFilter, MonthFilter};
    use crate::statistics::{BirthYearStats, Demographics};
    use crate::types::{TripDuration, parse_timestamp};
    use chrono::{TimeDelta, Weekday};

    fn section<T>(stats: Option<T>) -> Section<T> {
        Section {
            stats,
            elapsed: Duration::from_millis(3),
        }
    }

    fn popular<T>(value: T, count: usize) -> Popular<T> {
        Popular { value, count }
    }

    fn time_stats() -> TimeStats {
        TimeStats {
            month: popular(1, 2),
            weekday: popular(Weekday::Mon, 2),
            hour: popular(8, 1),
        }
    }

    fn user_stats(demographics: bool) -> UserStats {
        UserStats {
            user_types: vec![
                popular("Subscriber".to_string(), 2),
                popular("Customer".to_string(), 1),
            ],
            demographics: demographics.then(|| Demographics {
                genders: vec![popular("Male".to_string(), 2)],
                birth_years: Some(BirthYearStats {
                    earliest: 1939,
                    most_recent: 2001,
                    most_common: popular(1989, 2),
                }),
            }),
        }
    }

    fn sample_trip() -> Trip {
        let start = parse_timestamp("2017-06-23 15:09:32").unwrap();
        Trip::new(
            7,
            start,
            start + TimeDelta::minutes(5),
            "Wood St & Hubbard St",
            "Damen Ave & Chicago Ave",
        )
        .with_user_type("Subscriber")
        .with_gender("Female")
        .with_birth_year(1992)
    }

    #[test]
    fn test_table_time_stats() {
        let formatter = TableFormatter::new(false);
        let output = formatter.format_time_stats(&section(Some(time_stats())));
        assert!(output.contains("Calculating The Most Frequent Times of Travel..."));
        assert!(output.contains("January"));
        assert!(output.contains("Monday"));
        assert!(output.contains("Most common start hour"));
        assert!(output.contains("This took 0.003000 seconds."));
        assert!(output.contains(&"-".repeat(40)));
    }

    #[test]
    fn test_table_empty_section() {
        let formatter = TableFormatter::new(false);
        let output = formatter.format_station_stats(&section(None));
        assert!(output.contains(NO_DATA));
        assert!(output.contains("This took"));
    }

    #[test]
    fn test_table_duration_stats() {
        let formatter = TableFormatter::new(false);
        let stats = DurationStats {
            total: TripDuration::new(TimeDelta::minutes(60)),
            mean: TripDuration::new(TimeDelta::minutes(20)),
            trips: 3,
        };
        let output = formatter.format_duration_stats(&section(Some(stats)));
        assert!(output.contains("0 days 01:00:00"));
        assert!(output.contains("0 days 00:20:00"));
    }

    #[test]
    fn test_table_user_stats_with_and_without_demographics() {
        let formatter = TableFormatter::new(false);

        let output = formatter.format_user_stats(&section(Some(user_stats(true))));
        assert!(output.contains("Subscriber"));
        assert!(output.contains("Count of gender:"));
        assert!(output.contains("1939"));
        assert!(output.contains("2001"));
        assert!(output.contains("1989"));

        let output = formatter.format_user_stats(&section(Some(user_stats(false))));
        assert!(output.contains("Customer"));
        assert!(!output.contains("Count of gender:"));
        assert!(!output.contains("birth year"));
    }

    #[test]
    fn test_table_raw_rows() {
        let formatter = TableFormatter::new(false);

        let output = formatter.format_raw_rows(&[sample_trip()], City::Chicago);
        assert!(output.contains("Birth Year"));
        assert!(output.contains("Wood St & Hubbard St"));
        assert!(output.contains("2017-06-23 15:09:32"));
        assert!(output.contains("Friday"));
        assert!(output.contains("1992"));

        let output = formatter.format_raw_rows(&[sample_trip()], City::Washington);
        assert!(!output.contains("Birth Year"));
        assert!(!output.contains("Gender"));
    }

    #[test]
    fn test_json_sections() {
        let formatter = JsonFormatter;

        let value: Value =
            serde_json::from_str(&formatter.format_time_stats(&section(Some(time_stats()))))
                .unwrap();
        assert_eq!(value["stats"]["month"]["value"], "January");
        assert_eq!(value["stats"]["day_of_week"]["value"], "Monday");
        assert_eq!(value["stats"]["hour"]["value"], 8);

        let value: Value =
            serde_json::from_str(&formatter.format_station_stats(&section(None))).unwrap();
        assert!(value["stats"].is_null());

        let value: Value =
            serde_json::from_str(&formatter.format_user_stats(&section(Some(user_stats(false)))))
                .unwrap();
        assert!(value["stats"].get("gender").is_none());
        assert_eq!(value["stats"]["user_types"][0]["value"], "Subscriber");
    }

    #[test]
    fn test_raw_rows_show_source_columns() {
        use crate::data_loader::DataLoader;
        use std::path::Path;

        let csv = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
";
        let trips = DataLoader::read_trips(csv.as_bytes(), Path::new("chicago.csv")).unwrap();

        let table = TableFormatter::new(false).format_raw_rows(&trips, City::Chicago);
        assert!(table.contains("Id"));
        assert!(table.contains("Trip Duration"));
        assert!(table.contains("1423854"));
        assert!(table.contains("321"));

        let value: Value =
            serde_json::from_str(&JsonFormatter.format_raw_rows(&trips, City::Chicago)).unwrap();
        assert_eq!(value[0]["id"], 1423854);
        assert_eq!(value[0]["trip_duration"], 321.0);

        // Rows built without the source columns print NaN in the table
        let table =
            TableFormatter::new(false).format_raw_rows(&[sample_trip()], City::Washington);
        assert!(table.contains("NaN"));
    }

    #[test]
    fn test_json_header() {
        let selection = Selection::new(City::Chicago, MonthFilter::All, DayFilter::All);
        let value: Value =
            serde_json::from_str(&JsonFormatter.format_header(&selection, 12)).unwrap();
        assert_eq!(value["selection"]["city"], "chicago");
        assert_eq!(value["selection"]["month"], "all");
        assert_eq!(value["trips"], 12);
    }

    #[test]
    fn test_get_formatter() {
        let json_formatter = get_formatter(true, false);
        assert!(json_formatter.format_raw_rows(&[], City::Chicago).starts_with('['));

        let table_formatter = get_formatter(false, false);
        assert!(
            table_formatter
                .format_time_stats(&section(None))
                .contains(NO_DATA)
        );
    }
}
