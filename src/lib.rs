//! bikeshare - Explore US bikeshare trip data from the command line
//!
//! This library provides functionality to:
//! - Prompt for a city and month/day filters
//! - Load a city's trip CSV and derive month, weekday and hour columns
//! - Report popular travel times, stations, trip durations and user breakdowns
//! - Page through the filtered raw rows
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::{
//!     data_loader::DataLoader,
//!     filters::{DayFilter, MonthFilter, Selection},
//!     output::get_formatter,
//!     report::Reporter,
//!     types::City,
//! };
//!
//! fn main() -> bikeshare::Result<()> {
//!     let loader = DataLoader::new("data");
//!     let selection = Selection::new(City::Chicago, MonthFilter::All, DayFilter::All);
//!     let trips = loader.load_data(selection.city, selection.month, selection.day)?;
//!
//!     let reporter = Reporter::new(get_formatter(false, true));
//!     reporter.report(&mut std::io::stdout(), selection, &trips)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod data_loader;
pub mod output;
pub mod pager;
pub mod prompt;
pub mod report;
pub mod session;
pub mod statistics;

// Re-export core modules so callers only need this crate
pub use bikeshare_core::{error, filters, types};

// Re-export commonly used types
pub use bikeshare_core::{
    BikeshareError, City, DayFilter, MonthFilter, Result, Selection, Trip, TripDuration,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
