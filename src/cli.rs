//! CLI interface for bikeshare
//!
//! Without `--city` the tool runs the interactive session. With `--city` it
//! prints one report for the given selection and exits, which also allows
//! JSON output.
//!
//! # Example
//!
//! ```bash
//! # Interactive session over CSV files in ./data
//! bikeshare --data-dir data
//!
//! # One-shot report for Chicago Mondays in March, as JSON
//! bikeshare --data-dir data --city chicago --month march --day monday --json
//! ```

use crate::filters::{DayFilter, MonthFilter, Selection};
use crate::types::City;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Explore US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(name = "bikeshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, short = 'd', default_value = ".")]
    pub data_dir: PathBuf,

    /// City to report on (chicago, "new york city", washington); skips the prompts
    #[arg(long, short = 'c', value_parser = parse_city_arg)]
    pub city: Option<City>,

    /// Month filter (january..june or all), used with --city
    #[arg(long, short = 'm', value_parser = parse_month_arg, default_value = "all", requires = "city")]
    pub month: MonthFilter,

    /// Day filter (monday..sunday or all), used with --city
    #[arg(long, value_parser = parse_day_arg, default_value = "all", requires = "city")]
    pub day: DayFilter,

    /// Output the report as JSON (requires --city)
    #[arg(long, requires = "city")]
    pub json: bool,

    /// Show informational logging
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Disable colored headings
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// The one-shot selection, when `--city` was given
    pub fn selection(&self) -> Option<Selection> {
        self.city
            .map(|city| Selection::new(city, self.month, self.day))
    }
}

fn parse_city_arg(value: &str) -> Result<City, String> {
    City::from_str(value).map_err(|e| e.to_string())
}

fn parse_month_arg(value: &str) -> Result<MonthFilter, String> {
    MonthFilter::from_str(value).map_err(|e| e.to_string())
}

fn parse_day_arg(value: &str) -> Result<DayFilter, String> {
    DayFilter::from_str(value).map_err(|e| e.to_string())
}
