//! Error types for the call_forecast crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the call_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to forecasting operations
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Training data too short for a model
    #[error("{model} needs at least {needed} observations, got {got}")]
    InsufficientData {
        model: String,
        needed: usize,
        got: usize,
    },

    /// Error from the numerical kernels
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
