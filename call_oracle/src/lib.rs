//! # Call Oracle
//!
//! `call_oracle` answers questions about an API call log: which APIs are
//! busiest, what their daily call volume looks like, and which of three
//! forecasting models best predicts it.
//!
//! ## Example
//!
//! ```no_run
//! use call_oracle::CallOracle;
//!
//! let oracle = CallOracle::open("API Call Dataset.csv")?;
//!
//! for api in oracle.top_apis(3) {
//!     println!("{}", oracle.evaluate(&api));
//! }
//! # Ok::<(), call_oracle::OracleError>(())
//! ```

use call_forecast::{Evaluator, EvaluatorConfig};
use call_log::{CallLog, DailySeries};
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub mod config;

pub use crate::config::OracleConfig;
pub use call_forecast::{Evaluation, EvaluationOutcome, ModelChoice, ModelKind, ModelRun};
pub use call_log::export_file_name;

/// Errors raised by the call oracle
#[derive(Debug, Error)]
pub enum OracleError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure loading or exporting the call log
    #[error(transparent)]
    CallLog(#[from] call_log::CallLogError),

    /// Failure setting up the evaluator
    #[error(transparent)]
    Forecast(#[from] call_forecast::ForecastError),
}

/// Result type for oracle operations
pub type Result<T> = std::result::Result<T, OracleError>;

/// Read-only view over one loaded call log
///
/// Cloning is cheap; clones share the same log.
#[derive(Debug, Clone)]
pub struct CallOracle {
    log: Arc<CallLog>,
    evaluator: Evaluator,
}

impl CallOracle {
    /// Wrap an already loaded log with the default evaluation constants
    pub fn new(log: CallLog) -> Self {
        Self {
            log: Arc::new(log),
            evaluator: Evaluator::default(),
        }
    }

    /// Wrap a loaded log with custom evaluation constants
    pub fn with_config(log: CallLog, config: EvaluatorConfig) -> Result<Self> {
        Ok(Self {
            log: Arc::new(log),
            evaluator: Evaluator::new(config)?,
        })
    }

    /// Load the call log at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(CallLog::from_csv(path)?))
    }

    /// The underlying log
    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// The `n` most frequently called APIs, busiest first
    pub fn top_apis(&self, n: usize) -> Vec<String> {
        self.log.top_apis(n)
    }

    /// Gap-free daily call counts for `api_code`
    pub fn build_daily_series(&self, api_code: &str) -> DailySeries {
        self.log.build_daily_series(api_code)
    }

    /// Parsed call timestamps for `api_code`, oldest first
    pub fn raw_calls(&self, api_code: &str) -> Vec<NaiveDateTime> {
        self.log.raw_calls(api_code)
    }

    /// Fit and score every model on the daily series for `api_code`
    pub fn evaluate(&self, api_code: &str) -> EvaluationOutcome {
        let series = self.build_daily_series(api_code);
        self.evaluator.evaluate(api_code, &series)
    }

    /// The rows for `api_code` as CSV bytes, header included
    pub fn export_csv(&self, api_code: &str) -> Result<Vec<u8>> {
        Ok(self.log.export_csv(api_code)?)
    }

    /// Write the rows for `api_code` as CSV to `writer`, returning the row count
    pub fn write_csv<W: Write>(&self, api_code: &str, writer: W) -> Result<usize> {
        Ok(self.log.write_csv(api_code, writer)?)
    }

    /// Suggested file name for an export of `api_code`
    pub fn export_file_name(&self, api_code: &str) -> String {
        export_file_name(api_code)
    }
}
