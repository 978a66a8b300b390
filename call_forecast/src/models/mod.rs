//! Forecasting models for daily call counts

use crate::error::{ForecastError, Result};
use crate::metrics;
use call_log::DailySeries;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

pub mod arima;
pub mod exponential_smoothing;
pub mod holt_winters;

/// Forecast result containing predicted values
#[derive(Debug, Clone)]
pub struct ForecastResult {
    /// Forecasted values
    values: Vec<f64>,
    /// Number of periods forecasted
    horizons: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizons: usize) -> Result<Self> {
        if values.len() != horizons {
            return Err(ForecastError::ValidationError(format!(
                "Values length ({}) doesn't match horizons ({})",
                values.len(),
                horizons
            )));
        }

        Ok(Self { values, horizons })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Take ownership of the forecasted values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.horizons
    }

    /// Check that every forecasted value is a finite number
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Calculate mean squared error between forecast and actual values
    pub fn mean_squared_error(&self, actual: &[f64]) -> Result<f64> {
        metrics::mean_squared_error(actual, &self.values)
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, horizons: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a daily series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on daily call counts
    fn train(&self, data: &DailySeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// The three competing models, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Simple exponential smoothing
    #[serde(rename = "SES")]
    Ses,
    /// Additive Holt-Winters with weekly seasonality
    #[serde(rename = "Holt-Winters")]
    HoltWinters,
    /// ARIMA(5,1,0)
    #[serde(rename = "ARIMA")]
    Arima,
}

impl ModelKind {
    /// All models; earlier entries win ties on score
    pub const ALL: [ModelKind; 3] = [ModelKind::Ses, ModelKind::HoltWinters, ModelKind::Arima];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Ses => "SES",
            ModelKind::HoltWinters => "Holt-Winters",
            ModelKind::Arima => "ARIMA",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelKind {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ses" => Ok(ModelKind::Ses),
            "holt-winters" | "holtwinters" | "hw" => Ok(ModelKind::HoltWinters),
            "arima" => Ok(ModelKind::Arima),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown model '{}', expected SES, Holt-Winters or ARIMA",
                other
            ))),
        }
    }
}

/// Which model's forecast to present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelChoice {
    /// Whichever model scored best
    #[default]
    Best,
    /// A specific model
    Model(ModelKind),
}

impl FromStr for ModelChoice {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("best") {
            Ok(ModelChoice::Best)
        } else {
            s.parse().map(ModelChoice::Model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_labels_round_trip() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.label().parse::<ModelKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_model_choice_parsing() {
        assert_eq!("best".parse::<ModelChoice>().unwrap(), ModelChoice::Best);
        assert_eq!(
            "holt-winters".parse::<ModelChoice>().unwrap(),
            ModelChoice::Model(ModelKind::HoltWinters)
        );
        assert!("prophet".parse::<ModelChoice>().is_err());
    }

    #[test]
    fn test_forecast_result_length_check() {
        assert!(ForecastResult::new(vec![1.0, 2.0], 3).is_err());
        let result = ForecastResult::new(vec![1.0, f64::NAN], 2).unwrap();
        assert!(!result.is_finite());
    }
}
