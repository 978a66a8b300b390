//! Exponential smoothing recursions
//!
//! Contains the state machines behind the smoothing forecasters:
//! - Simple (level-only) exponential smoothing
//! - Additive Holt-Winters (level, trend and additive seasonality)
//!
//! Both are fed one observation at a time. Calling `forecast` before `update`
//! gives the one-step-ahead prediction for the value about to be observed,
//! which is what the sum-of-squared-errors helpers use.

use crate::{MathError, Result};

/// Simple exponential smoothing state
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    level: Option<f64>,
    values_seen: usize,
}

impl ExponentialSmoothing {
    /// Create a new smoother with the specified alpha (smoothing factor, 0..=1)
    pub fn new(alpha: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(MathError::InvalidInput(
                "Alpha must be between 0 and 1 (inclusive)".to_string(),
            ));
        }

        Ok(Self {
            alpha,
            level: None,
            values_seen: 0,
        })
    }

    /// Create a smoother whose level starts at `initial_level` instead of the first value
    pub fn with_initial_level(alpha: f64, initial_level: f64) -> Result<Self> {
        let mut smoother = Self::new(alpha)?;
        smoother.level = Some(initial_level);
        Ok(smoother)
    }

    /// Update the smoother with a new value
    pub fn update(&mut self, value: f64) -> Result<()> {
        self.values_seen += 1;

        self.level = Some(match self.level {
            None => value,
            Some(level) => self.alpha * value + (1.0 - self.alpha) * level,
        });

        Ok(())
    }

    /// Forecast the next value; flat at the current level for any horizon
    pub fn forecast(&self) -> Result<f64> {
        self.level.ok_or_else(|| {
            MathError::InsufficientData("No data available for exponential smoothing".to_string())
        })
    }

    /// Get the current alpha value
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of observations absorbed so far
    pub fn values_seen(&self) -> usize {
        self.values_seen
    }

    /// Sum of squared one-step-ahead errors over `values`
    pub fn sse(values: &[f64], alpha: f64, initial_level: f64) -> Result<f64> {
        let mut smoother = Self::with_initial_level(alpha, initial_level)?;
        let mut sse = 0.0;
        for &value in values {
            let error = value - smoother.forecast()?;
            sse += error * error;
            smoother.update(value)?;
        }
        Ok(sse)
    }
}

/// Additive Holt-Winters state
///
/// - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(y_t - l_t) + (1-γ)s_{t-m}`
/// - Forecast: `ŷ_{t+h} = l_t + h·b_t + s_{t+h-m}`
#[derive(Debug, Clone)]
pub struct HoltWintersSmoothing {
    alpha: f64,
    beta: f64,
    gamma: f64,
    period: usize,
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    values_seen: usize,
}

impl HoltWintersSmoothing {
    /// Initialise the state from the leading seasons of `values`
    ///
    /// Uses the first `period` observations; the caller continues by feeding
    /// `values[period..]` through [`update`](Self::update).
    pub fn initialize(
        alpha: f64,
        beta: f64,
        gamma: f64,
        period: usize,
        values: &[f64],
    ) -> Result<Self> {
        for (name, value) in [("Alpha", alpha), ("Beta", beta), ("Gamma", gamma)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MathError::InvalidInput(format!(
                    "{} must be between 0 and 1 (inclusive)",
                    name
                )));
            }
        }
        if period < 2 {
            return Err(MathError::InvalidInput(
                "Seasonal period must be at least 2".to_string(),
            ));
        }
        if values.len() < period {
            return Err(MathError::InsufficientData(format!(
                "Need at least one full season ({} points), got {}",
                period,
                values.len()
            )));
        }

        let first_season = &values[..period];
        let level = first_season.iter().sum::<f64>() / period as f64;

        // Average per-step change between the first two seasons
        let trend = if values.len() >= 2 * period {
            (0..period)
                .map(|i| (values[period + i] - values[i]) / period as f64)
                .sum::<f64>()
                / period as f64
        } else {
            0.0
        };

        let mut seasonals: Vec<f64> = first_season.iter().map(|y| y - level).collect();
        let offset = seasonals.iter().sum::<f64>() / period as f64;
        for s in seasonals.iter_mut() {
            *s -= offset;
        }

        Ok(Self {
            alpha,
            beta,
            gamma,
            period,
            level,
            trend,
            seasonals,
            values_seen: period,
        })
    }

    /// Forecast `h` steps past the last absorbed observation (`h >= 1`)
    pub fn forecast(&self, h: usize) -> Result<f64> {
        if h == 0 {
            return Err(MathError::InvalidInput(
                "Forecast horizon must be at least 1".to_string(),
            ));
        }
        let season = self.seasonals[(self.values_seen + h - 1) % self.period];
        Ok(self.level + h as f64 * self.trend + season)
    }

    /// Update the state with the next observation
    pub fn update(&mut self, value: f64) -> Result<()> {
        let idx = self.values_seen % self.period;
        let season = self.seasonals[idx];
        let prev_level = self.level;

        self.level =
            self.alpha * (value - season) + (1.0 - self.alpha) * (prev_level + self.trend);
        self.trend = self.beta * (self.level - prev_level) + (1.0 - self.beta) * self.trend;
        self.seasonals[idx] = self.gamma * (value - self.level) + (1.0 - self.gamma) * season;
        self.values_seen += 1;

        Ok(())
    }

    /// Current level
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Current trend
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Current seasonal indices, indexed by position modulo the period
    pub fn seasonals(&self) -> &[f64] {
        &self.seasonals
    }

    /// Sum of squared one-step-ahead errors after the initialisation season
    pub fn sse(values: &[f64], alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<f64> {
        let mut state = Self::initialize(alpha, beta, gamma, period, values)?;
        let mut sse = 0.0;
        for &value in &values[period..] {
            let error = value - state.forecast(1)?;
            sse += error * error;
            state.update(value)?;
        }
        Ok(sse)
    }
}
