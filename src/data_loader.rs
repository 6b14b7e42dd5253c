//! Data loader module for reading city trip datasets
//!
//! This module resolves a city to its CSV file inside the data directory,
//! reads every row into a [`Trip`] with its derived month, weekday and hour,
//! and applies the month/day selection.
//!
//! Any problem with the source (missing file, malformed row, unparsable
//! timestamp) is returned as an error; nothing is skipped silently.
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::data_loader::DataLoader;
//! use bikeshare::filters::{DayFilter, MonthFilter};
//! use bikeshare::types::City;
//!
//! # fn example() -> bikeshare::Result<()> {
//! let loader = DataLoader::new("./data");
//! let trips = loader.load_data(City::Chicago, MonthFilter::All, DayFilter::All)?;
//! println!("{} trips", trips.len());
//! # Ok(())
//! # }
//! ```

use crate::error::{BikeshareError, Result};
use crate::filters::{DayFilter, MonthFilter, TripFilter};
use crate::types::{City, RawTrip, Trip};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Data loader for the per-city CSV files
pub struct DataLoader {
    /// Directory holding `chicago.csv`, `new_york_city.csv`, `washington.csv`
    data_dir: PathBuf,
    /// Show a spinner while reading
    show_progress: bool,
}

impl DataLoader {
    /// Create a loader reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            show_progress: false,
        }
    }

    /// Enable or disable the loading spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the dataset backing `city`
    pub fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(city.data_file())
    }

    /// Load a city's trips and keep those matching `month` and `day`
    pub fn load_data(&self, city: City, month: MonthFilter, day: DayFilter) -> Result<Vec<Trip>> {
        let trips = self.load_city(city)?;
        let total = trips.len();

        let filter = TripFilter::new().with_month(month).with_day(day);
        let trips = filter.apply(trips);

        info!(
            "Loaded {} of {} {} trips (month: {}, day: {})",
            trips.len(),
            total,
            city.display_name(),
            month,
            day
        );
        Ok(trips)
    }

    /// Load every trip of a city, unfiltered, in file order
    pub fn load_city(&self, city: City) -> Result<Vec<Trip>> {
        let path = self.path_for(city);
        if !path.exists() {
            return Err(BikeshareError::DataFileNotFound(path));
        }
        debug!("Reading {} data from {}", city.display_name(), path.display());

        let file = File::open(&path)?;

        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner} {msg} {pos} rows")
                .unwrap_or_else(|_| ProgressStyle::default_spinner());
            pb.set_style(style);
            pb.set_message(format!("Loading {} data", city.display_name()));
            Some(pb)
        } else {
            None
        };

        let result = Self::read_trips_with_progress(file, &path, progress.as_ref());

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        result
    }

    /// Parse trips from any CSV reader; `source` names it in errors
    pub fn read_trips<R: Read>(reader: R, source: &Path) -> Result<Vec<Trip>> {
        Self::read_trips_with_progress(reader, source, None)
    }

    fn read_trips_with_progress<R: Read>(
        reader: R,
        source: &Path,
        progress: Option<&ProgressBar>,
    ) -> Result<Vec<Trip>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut trips = Vec::new();
        for (row, record) in csv_reader.deserialize::<RawTrip>().enumerate() {
            let raw = record?;
            let trip = Trip::from_raw(row, raw).map_err(|e| BikeshareError::Parse {
                file: source.to_path_buf(),
                error: format!("row {}: {}", row + 1, e),
            })?;
            trips.push(trip);

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        debug!("Parsed {} trips from {}", trips.len(), source.display());
        Ok(trips)
    }
}
