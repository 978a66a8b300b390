//! # Call Forecast
//!
//! Fits, scores and selects forecasting models for daily API call volume.
//!
//! ## Features
//!
//! - Simple exponential smoothing with estimated smoothing factor and level
//! - Additive Holt-Winters with weekly seasonality
//! - ARIMA(5,1,0) fitted by Yule-Walker
//! - Chronological 80/20 hold-out scoring by mean squared error
//! - Per-model failure isolation: a model that cannot be fitted scores `+∞`
//!
//! ## Quick Start
//!
//! ```no_run
//! use call_forecast::{EvaluationOutcome, Evaluator, ModelChoice};
//! use call_log::CallLog;
//!
//! let log = CallLog::from_csv("API Call Dataset.csv")?;
//! let series = log.build_daily_series("PAY");
//!
//! let outcome = Evaluator::default().evaluate("PAY", &series);
//! if let EvaluationOutcome::Evaluated(evaluation) = &outcome {
//!     if let Some(run) = evaluation.forecast_for(ModelChoice::Best) {
//!         println!("{} forecast: {:?}", run.model, run.forecast);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod evaluation;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use crate::error::{ForecastError, Result};
pub use crate::evaluation::{
    Evaluation, EvaluationOutcome, Evaluator, EvaluatorConfig, ModelRun, Split,
};
pub use crate::models::{
    ForecastModel, ForecastResult, ModelChoice, ModelKind, TrainedForecastModel,
};

/// Version of this crate, as published in its manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of this crate, as published in its manifest
pub const NAME: &str = env!("CARGO_PKG_NAME");
