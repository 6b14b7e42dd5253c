//! Statistics reporters
//!
//! [`Reporter`] computes each report section, times it, and writes it through
//! an [`OutputFormatter`] as soon as it is ready, in the fixed order: travel
//! times, stations, trip durations, users. [`TripReport`] holds all four
//! sections for formats that print the report in one piece.

use crate::error::Result;
use crate::filters::Selection;
use crate::output::OutputFormatter;
use crate::statistics::{DurationStats, Section, StationStats, TimeStats, UserStats};
use crate::types::{City, Trip};
use std::io::Write;
use tracing::debug;

/// All four report sections for one selection
#[derive(Debug, Clone, PartialEq)]
pub struct TripReport {
    pub selection: Selection,
    pub trip_count: usize,
    pub time: Section<TimeStats>,
    pub stations: Section<StationStats>,
    pub durations: Section<DurationStats>,
    pub users: Section<UserStats>,
}

impl TripReport {
    /// Compute every section without printing anything
    pub fn compute(selection: Selection, trips: &[Trip]) -> Self {
        Self {
            selection,
            trip_count: trips.len(),
            time: Section::timed(|| TimeStats::compute(trips)),
            stations: Section::timed(|| StationStats::compute(trips)),
            durations: Section::timed(|| DurationStats::compute(trips)),
            users: Section::timed(|| UserStats::compute(trips, selection.city)),
        }
    }
}

/// Computes report sections and writes them as they complete
pub struct Reporter {
    formatter: Box<dyn OutputFormatter>,
}

impl Reporter {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter.as_ref()
    }

    /// Most frequent month, day of week and start hour
    pub fn time_stats<W: Write>(&self, out: &mut W, trips: &[Trip]) -> Result<Section<TimeStats>> {
        let section = Section::timed(|| TimeStats::compute(trips));
        write!(out, "{}", self.formatter.format_time_stats(&section))?;
        Ok(section)
    }

    /// Most popular start station, end station and trip
    pub fn station_stats<W: Write>(
        &self,
        out: &mut W,
        trips: &[Trip],
    ) -> Result<Section<StationStats>> {
        let section = Section::timed(|| StationStats::compute(trips));
        write!(out, "{}", self.formatter.format_station_stats(&section))?;
        Ok(section)
    }

    /// Total and mean travel time
    pub fn trip_duration_stats<W: Write>(
        &self,
        out: &mut W,
        trips: &[Trip],
    ) -> Result<Section<DurationStats>> {
        let section = Section::timed(|| DurationStats::compute(trips));
        write!(out, "{}", self.formatter.format_duration_stats(&section))?;
        Ok(section)
    }

    /// User types, plus gender and birth year for cities that record them
    pub fn user_stats<W: Write>(
        &self,
        out: &mut W,
        trips: &[Trip],
        city: City,
    ) -> Result<Section<UserStats>> {
        let section = Section::timed(|| UserStats::compute(trips, city));
        write!(out, "{}", self.formatter.format_user_stats(&section))?;
        Ok(section)
    }

    /// Run all four reporters in order
    pub fn report<W: Write>(
        &self,
        out: &mut W,
        selection: Selection,
        trips: &[Trip],
    ) -> Result<TripReport> {
        write!(out, "{}", self.formatter.format_header(&selection, trips.len()))?;

        let report = TripReport {
            selection,
            trip_count: trips.len(),
            time: self.time_stats(out, trips)?,
            stations: self.station_stats(out, trips)?,
            durations: self.trip_duration_stats(out, trips)?,
            users: self.user_stats(out, trips, selection.city)?,
        };
        out.flush()?;

        debug!(
            "Reported {} trips for {} in {:?}",
            report.trip_count,
            selection,
            report.time.elapsed
                + report.stations.elapsed
                + report.durations.elapsed
                + report.users.elapsed
        );
        Ok(report)
    }
}
