//! Error types for bikeshare
//!
//! This module defines the error types used throughout the bikeshare library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use bikeshare_core::error::{BikeshareError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to BikeshareError
//!     let _file = std::fs::read_to_string("nonexistent.csv")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bikeshare operations
///
/// Data-access failures (missing files, malformed rows, bad timestamps) are
/// fatal for the session and surface through this type.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing file for a city does not exist
    #[error("Data file not found: {}", .0.display())]
    DataFileNotFound(PathBuf),

    /// Parse error with file context
    #[error("Parse error in {}: {error}", file.display())]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Timestamp that matches none of the accepted formats
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// City name outside the registry
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in bikeshare
///
/// # Example
///
/// ```
/// use bikeshare_core::Result;
///
/// fn count_rows() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, BikeshareError>;
