//! ARIMA models for time series forecasting

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use call_log::DailySeries;
use forecast_math::autoregression::{ar_forecast, yule_walker};
use forecast_math::differencing::{difference, integrate};

/// ARIMA model (AutoRegressive Integrated Moving Average)
///
/// The differenced series is fitted as a zero-mean AR(p) process by
/// Yule-Walker; forecasts are integrated back onto the original scale.
/// Moving-average terms are not supported.
#[derive(Debug, Clone)]
pub struct ArimaModel {
    /// Name of the model
    name: String,
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
    /// MA order (q)
    q: usize,
}

/// Trained ARIMA model
#[derive(Debug, Clone)]
pub struct TrainedArimaModel {
    /// Name of the model
    name: String,
    /// Differencing order (d)
    d: usize,
    /// Fitted AR coefficients
    ar_coefficients: Vec<f64>,
    /// Training observations on the original scale
    historical_data: Vec<f64>,
}

impl ArimaModel {
    /// Create a new ARIMA model
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if q > 0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Moving-average order must be 0, got {}",
                q
            )));
        }

        Ok(Self {
            name: "ARIMA".to_string(),
            p,
            d,
            q,
        })
    }

    /// The `(p, d, q)` order
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Fewest training observations the model accepts
    pub fn min_observations(&self) -> usize {
        self.p + self.d + 1
    }
}

impl Default for ArimaModel {
    fn default() -> Self {
        Self {
            name: "ARIMA".to_string(),
            p: 5,
            d: 1,
            q: 0,
        }
    }
}

impl ForecastModel for ArimaModel {
    type Trained = TrainedArimaModel;

    fn train(&self, data: &DailySeries) -> Result<TrainedArimaModel> {
        let values = data.values();
        if values.len() < self.min_observations() {
            return Err(ForecastError::InsufficientData {
                model: self.name.clone(),
                needed: self.min_observations(),
                got: values.len(),
            });
        }

        let differenced = difference(&values, self.d);
        let ar_coefficients = yule_walker(&differenced, self.p)?;

        log::debug!(
            "ARIMA({},{},{}) fitted coefficients {:?}",
            self.p,
            self.d,
            self.q,
            ar_coefficients
        );

        Ok(TrainedArimaModel {
            name: self.name.clone(),
            d: self.d,
            ar_coefficients,
            historical_data: values,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedArimaModel {
    /// Fitted AR coefficients `phi_1..phi_p`
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coefficients
    }
}

impl TrainedForecastModel for TrainedArimaModel {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let differenced = difference(&self.historical_data, self.d);
        let steps = ar_forecast(&differenced, &self.ar_coefficients, horizon)?;
        let values = integrate(&steps, &self.historical_data, self.d)?;

        ForecastResult::new(values, horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
