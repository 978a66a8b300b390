//! # Forecast Math
//!
//! Numerical kernels shared by the call-volume forecasting models.
//! This crate has no notion of APIs or call logs; it works on plain `f64`
//! slices and provides:
//!
//! - Exponential smoothing recursions (level-only and additive Holt-Winters)
//! - Bounded Nelder-Mead minimisation for parameter estimation
//! - Differencing and integration of series
//! - Yule-Walker estimation and recursive forecasting of AR processes
//! - Descriptive summary statistics

use thiserror::Error;

pub mod autoregression;
pub mod differencing;
pub mod optimization;
pub mod smoothing;
pub mod stats;

/// Errors that can occur in numerical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecast math operations
pub type Result<T> = std::result::Result<T, MathError>;
