//! Metrics for evaluating forecast performance

use crate::error::{ForecastError, Result};

/// Mean of the squared differences between `actual` and `forecast`
pub fn mean_squared_error(actual: &[f64], forecast: &[f64]) -> Result<f64> {
    if actual.len() != forecast.len() || actual.is_empty() {
        return Err(ForecastError::ValidationError(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let sum: f64 = actual
        .iter()
        .zip(forecast)
        .map(|(a, f)| (a - f).powi(2))
        .sum();

    Ok(sum / actual.len() as f64)
}
