//! Simple exponential smoothing with estimated parameters

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use call_log::DailySeries;
use forecast_math::optimization::{nelder_mead, NelderMeadConfig};
use forecast_math::smoothing::ExponentialSmoothing;

/// Simple exponential smoothing model
///
/// The smoothing factor and the initial level are both estimated by
/// minimising the in-sample sum of squared one-step-ahead errors.
#[derive(Debug, Clone)]
pub struct SimpleExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Optimiser settings
    optimizer: NelderMeadConfig,
}

/// Trained simple exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedSimpleExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Fitted smoothing parameter
    alpha: f64,
    /// Fitted initial level
    initial_level: f64,
    /// Level after the last training observation
    level: f64,
}

impl SimpleExponentialSmoothing {
    /// Create a new simple exponential smoothing model
    pub fn new() -> Self {
        Self {
            name: "SES".to_string(),
            optimizer: NelderMeadConfig::default(),
        }
    }

    /// Override the optimiser settings
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }
}

impl Default for SimpleExponentialSmoothing {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for SimpleExponentialSmoothing {
    type Trained = TrainedSimpleExponentialSmoothing;

    fn train(&self, data: &DailySeries) -> Result<Self::Trained> {
        let values = data.values();
        let first = match values.first() {
            Some(&first) => first,
            None => {
                return Err(ForecastError::InsufficientData {
                    model: self.name.clone(),
                    needed: 1,
                    got: 0,
                })
            }
        };

        // A single observation pins the level; there is nothing to fit
        let (alpha, initial_level) = if values.len() == 1 {
            (1.0, first)
        } else {
            let objective = |params: &[f64]| {
                ExponentialSmoothing::sse(&values, params[0], params[1]).unwrap_or(f64::MAX)
            };
            let minimum = nelder_mead(
                objective,
                &[0.5, first],
                &[(0.0, 1.0), (f64::NEG_INFINITY, f64::INFINITY)],
                &self.optimizer,
            )?;
            (minimum.point[0], minimum.point[1])
        };

        let mut smoother = ExponentialSmoothing::with_initial_level(alpha, initial_level)?;
        for &value in &values {
            smoother.update(value)?;
        }
        let level = smoother.forecast()?;

        log::debug!(
            "SES fitted alpha={:.4} initial_level={:.4} level={:.4}",
            alpha,
            initial_level,
            level
        );

        Ok(TrainedSimpleExponentialSmoothing {
            name: self.name.clone(),
            alpha,
            initial_level,
            level,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedSimpleExponentialSmoothing {
    /// Fitted smoothing parameter
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fitted initial level
    pub fn initial_level(&self) -> f64 {
        self.initial_level
    }

    /// Level after the last training observation
    pub fn level(&self) -> f64 {
        self.level
    }
}

impl TrainedForecastModel for TrainedSimpleExponentialSmoothing {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        // The forecast is flat at the final level
        ForecastResult::new(vec![self.level; horizon], horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn series(counts: &[u64]) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DailySeries::from_counts(start, counts).unwrap()
    }

    #[test]
    fn test_constant_series_forecasts_constant() {
        let trained = SimpleExponentialSmoothing::new()
            .train(&series(&[4, 4, 4, 4, 4, 4]))
            .unwrap();
        let forecast = trained.forecast(3).unwrap();

        for &value in forecast.values() {
            assert_relative_eq!(value, 4.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_single_observation() {
        let trained = SimpleExponentialSmoothing::new()
            .train(&series(&[7]))
            .unwrap();

        assert_relative_eq!(trained.level(), 7.0);
        assert_eq!(trained.forecast(2).unwrap().values(), &[7.0, 7.0]);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let result = SimpleExponentialSmoothing::new().train(&DailySeries::empty());
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientData { needed: 1, got: 0, .. })
        ));
    }

    #[test]
    fn test_alpha_within_bounds() {
        let trained = SimpleExponentialSmoothing::new()
            .train(&series(&[1, 9, 2, 8, 3, 7, 4]))
            .unwrap();

        assert!((0.0..=1.0).contains(&trained.alpha()));
        assert!(trained.forecast(1).unwrap().is_finite());
    }
}
