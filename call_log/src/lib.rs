//! # Call Log
//!
//! Reads an API call log into memory and derives the views the forecaster
//! needs from it.
//!
//! ## Features
//!
//! - One-shot CSV loading into an immutable [`CallLog`]
//! - Ranking identifiers by call frequency ([`CallLog::top_apis`])
//! - Permissive timestamp parsing; malformed timestamps are dropped
//! - Daily resampling into a gap-free [`DailySeries`]
//! - Schema-preserving CSV export of one identifier's rows
//!
//! ## Quick Start
//!
//! ```no_run
//! use call_log::CallLog;
//!
//! let log = CallLog::from_csv("API Call Dataset.csv")?;
//!
//! let busiest = log.top_apis(5);
//! let series = log.build_daily_series(&busiest[0]);
//! println!("{} days of history", series.len());
//! # Ok::<(), call_log::CallLogError>(())
//! ```

use thiserror::Error;

pub mod export;
pub mod loader;
pub mod selector;
pub mod series;
pub mod timestamp;

pub use crate::export::export_file_name;
pub use crate::loader::CallLog;
pub use crate::selector::ApiFrequency;
pub use crate::series::{DailyCount, DailySeries};
pub use crate::timestamp::parse_timestamp;

/// Column holding the API identifier
pub const API_CODE_COLUMN: &str = "API Code";

/// Column holding the free-text call timestamp
pub const TIME_OF_CALL_COLUMN: &str = "Time of Call";

/// Errors raised while loading or exporting a call log
#[derive(Debug, Error)]
pub enum CallLogError {
    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A series could not be constructed
    #[error("Invalid series: {0}")]
    InvalidSeries(String),
}

/// Result type for call log operations
pub type Result<T> = std::result::Result<T, CallLogError>;
