//! # Call Oracle Workspace
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`call_log`]: loading, ranking, resampling and exporting call logs
//! - [`forecast_math`]: smoothing, optimisation and autoregression kernels
//! - [`call_forecast`]: model fitting, scoring and selection
//! - [`call_oracle`]: the facade and configuration used by the CLI
//!
//! ## Example
//!
//! ```
//! use call_oracle_workspace::call_log::{CallLog, DailySeries};
//! use call_oracle_workspace::call_forecast::{EvaluationOutcome, Evaluator};
//!
//! let csv = "API Code,Time of Call\nPAY,2024-05-01 08:00:00\n";
//! let log = CallLog::from_reader(csv.as_bytes()).unwrap();
//! let series: DailySeries = log.build_daily_series("PAY");
//!
//! let outcome = Evaluator::default().evaluate("PAY", &series);
//! assert!(matches!(outcome, EvaluationOutcome::InsufficientData { .. }));
//! ```

pub use call_forecast;
pub use call_log;
pub use call_oracle;
pub use forecast_math;
