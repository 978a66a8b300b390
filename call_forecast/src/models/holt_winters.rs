//! Additive Holt-Winters model with weekly seasonality

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use call_log::DailySeries;
use forecast_math::optimization::{nelder_mead, NelderMeadConfig};
use forecast_math::smoothing::HoltWintersSmoothing;

/// Default seasonal period for daily data
pub const WEEKLY_PERIOD: usize = 7;

const PARAM_BOUNDS: (f64, f64) = (0.0001, 0.9999);
const PARAM_START: [f64; 3] = [0.3, 0.1, 0.1];

/// Holt-Winters model with additive trend and additive seasonality
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    /// Seasonal period in days
    period: usize,
    /// Optimiser settings
    optimizer: NelderMeadConfig,
}

/// Trained Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    /// Name of the model
    name: String,
    /// Fitted level smoothing parameter
    alpha: f64,
    /// Fitted trend smoothing parameter
    beta: f64,
    /// Fitted seasonal smoothing parameter
    gamma: f64,
    /// State after the last training observation
    state: HoltWintersSmoothing,
}

impl HoltWinters {
    /// Create a new Holt-Winters model with the given seasonal period
    pub fn new(period: usize) -> Result<Self> {
        if period < 2 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal period must be at least 2".to_string(),
            ));
        }

        Ok(Self {
            name: "Holt-Winters".to_string(),
            period,
            optimizer: NelderMeadConfig::default(),
        })
    }

    /// Seasonal period in days
    pub fn period(&self) -> usize {
        self.period
    }

    /// Fewest training observations the model accepts
    ///
    /// One season initialises the state and at least one more observation is
    /// needed to score parameters against.
    pub fn min_observations(&self) -> usize {
        self.period + 1
    }

    /// Override the optimiser settings
    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }
}

impl Default for HoltWinters {
    fn default() -> Self {
        Self {
            name: "Holt-Winters".to_string(),
            period: WEEKLY_PERIOD,
            optimizer: NelderMeadConfig::default(),
        }
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn train(&self, data: &DailySeries) -> Result<Self::Trained> {
        let values = data.values();
        if values.len() < self.min_observations() {
            return Err(ForecastError::InsufficientData {
                model: self.name.clone(),
                needed: self.min_observations(),
                got: values.len(),
            });
        }

        let period = self.period;
        let objective = |params: &[f64]| {
            HoltWintersSmoothing::sse(&values, params[0], params[1], params[2], period)
                .unwrap_or(f64::MAX)
        };
        let minimum = nelder_mead(
            objective,
            &PARAM_START,
            &[PARAM_BOUNDS; 3],
            &self.optimizer,
        )?;
        let (alpha, beta, gamma) = (minimum.point[0], minimum.point[1], minimum.point[2]);

        let mut state = HoltWintersSmoothing::initialize(alpha, beta, gamma, period, &values)?;
        for &value in &values[period..] {
            state.update(value)?;
        }

        log::debug!(
            "Holt-Winters fitted alpha={:.4} beta={:.4} gamma={:.4} sse={:.4}",
            alpha,
            beta,
            gamma,
            minimum.value
        );

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            alpha,
            beta,
            gamma,
            state,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedHoltWinters {
    /// Fitted `(alpha, beta, gamma)`
    pub fn parameters(&self) -> (f64, f64, f64) {
        (self.alpha, self.beta, self.gamma)
    }

    /// Final level, trend and seasonal state
    pub fn state(&self) -> &HoltWintersSmoothing {
        &self.state
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let values = (1..=horizon)
            .map(|h| self.state.forecast(h))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        ForecastResult::new(values, horizon)
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
    fn test_needs_a_season_plus_one() {
        let model = HoltWinters::default();
        let result = model.train(&series(&[1, 2, 3, 4, 5, 6, 7]));

        assert!(matches!(
            result,
            Err(ForecastError::InsufficientData { needed: 8, got: 7, .. })
        ));
        assert!(model.train(&series(&[1, 2, 3, 4, 5, 6, 7, 1])).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_period() {
        assert!(HoltWinters::new(1).is_err());
    }

    #[test]
    fn test_repeating_week_is_reproduced() {
        let week = [10, 12, 14, 16, 14, 4, 2];
        let counts: Vec<u64> = week.iter().cycle().take(28).copied().collect();

        let trained = HoltWinters::default().train(&series(&counts)).unwrap();
        let forecast = trained.forecast(7).unwrap();

        for (predicted, expected) in forecast.values().iter().zip(week.iter()) {
            assert_relative_eq!(*predicted, *expected as f64, epsilon = 0.5);
        }
    }

    #[test]
    fn test_parameters_stay_in_bounds() {
        let trained = HoltWinters::default()
            .train(&series(&[3, 8, 1, 0, 5, 9, 2, 4, 7, 1]))
            .unwrap();
        let (alpha, beta, gamma) = trained.parameters();

        for p in [alpha, beta, gamma] {
            assert!((PARAM_BOUNDS.0..=PARAM_BOUNDS.1).contains(&p));
        }
        assert!(trained.forecast(3).unwrap().is_finite());
    }
}
