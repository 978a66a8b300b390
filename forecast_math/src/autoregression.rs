//! Autoregressive process estimation and forecasting
//!
//! Coefficients are estimated with the Yule-Walker equations, solved by the
//! Durbin-Levinson recursion. The series is treated as zero-mean (no
//! constant term), which is the convention for a differenced ARIMA series
//! without drift.

use crate::{MathError, Result};

const VARIANCE_FLOOR: f64 = 1e-12;

/// Sample autocovariances `r_0..=r_max_lag` around zero, with the biased `1/n` normaliser
pub fn autocovariances(series: &[f64], max_lag: usize) -> Vec<f64> {
    let n = series.len() as f64;
    (0..=max_lag)
        .map(|lag| {
            if lag >= series.len() {
                return 0.0;
            }
            series[lag..]
                .iter()
                .zip(series.iter())
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n
        })
        .collect()
}

/// Estimate AR(`order`) coefficients for `series` by Yule-Walker
///
/// Returns `phi_1..phi_order`. A series with no variation yields all-zero
/// coefficients. If the recursion reaches a perfectly predictable stage
/// before `order`, the remaining coefficients stay zero.
pub fn yule_walker(series: &[f64], order: usize) -> Result<Vec<f64>> {
    if order == 0 {
        return Ok(Vec::new());
    }
    if series.len() <= order {
        return Err(MathError::InsufficientData(format!(
            "AR({}) needs more than {} observations, got {}",
            order,
            order,
            series.len()
        )));
    }
    if series.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Series contains non-finite values".to_string(),
        ));
    }

    let r = autocovariances(series, order);
    let mut phi = vec![0.0; order];
    if r[0] < VARIANCE_FLOOR {
        return Ok(phi);
    }

    let mut variance = r[0];
    for m in 1..=order {
        if variance < VARIANCE_FLOOR * r[0] {
            break;
        }

        let mut numerator = r[m];
        for j in 1..m {
            numerator -= phi[j - 1] * r[m - j];
        }
        let reflection = numerator / variance;

        let previous = phi.clone();
        phi[m - 1] = reflection;
        for j in 1..m {
            phi[j - 1] = previous[j - 1] - reflection * previous[m - j - 1];
        }

        variance *= 1.0 - reflection * reflection;
    }

    if phi.iter().any(|c| !c.is_finite()) {
        return Err(MathError::CalculationError(
            "Yule-Walker recursion produced non-finite coefficients".to_string(),
        ));
    }

    Ok(phi)
}

/// Recursively forecast an AR process `horizon` steps past `history`
///
/// Each forecast is fed back as history for the next step.
pub fn ar_forecast(history: &[f64], coefficients: &[f64], horizon: usize) -> Result<Vec<f64>> {
    let p = coefficients.len();
    if history.len() < p {
        return Err(MathError::InsufficientData(format!(
            "AR({}) forecast needs {} lagged values, got {}",
            p,
            p,
            history.len()
        )));
    }

    let mut window = history[history.len() - p..].to_vec();
    let mut forecasts = Vec::with_capacity(horizon);

    for _ in 0..horizon {
        let forecast: f64 = coefficients
            .iter()
            .enumerate()
            .map(|(i, phi)| phi * window[window.len() - 1 - i])
            .sum();

        window.push(forecast);
        forecasts.push(forecast);
    }

    Ok(forecasts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_autocovariances() {
        let r = autocovariances(&[1.0, -1.0, 1.0, -1.0], 2);
        assert_relative_eq!(r[0], 1.0);
        assert_relative_eq!(r[1], -0.75);
        assert_relative_eq!(r[2], 0.5);
    }

    #[test]
    fn test_ar1_coefficient_matches_lag_one_ratio() {
        let series = [2.0, -1.0, 2.0, -3.0, 2.0, -1.0, 3.0];
        let phi = yule_walker(&series, 1).unwrap();
        let r = autocovariances(&series, 1);
        assert_relative_eq!(phi[0], r[1] / r[0], epsilon = 1e-12);
    }

    #[test]
    fn test_recovers_geometric_decay() {
        // x_t = 0.5 x_{t-1} with a long enough run to dominate the edge effects
        let series: Vec<f64> = (0..200).map(|i| 0.5_f64.powi(i % 20)).collect();
        let phi = yule_walker(&series, 1).unwrap();
        assert!(phi[0] > 0.3 && phi[0] < 0.7);
    }

    #[test]
    fn test_higher_order_is_stationary() {
        let series = [2.0, -1.0, 2.0, -3.0, 2.0, -1.0, 3.0];
        let phi = yule_walker(&series, 5).unwrap();
        assert_eq!(phi.len(), 5);
        assert!(phi.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_constant_zero_series_gives_zero_coefficients() {
        let phi = yule_walker(&[0.0; 10], 3).unwrap();
        assert_eq!(phi, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_needs_more_points_than_order() {
        assert!(matches!(
            yule_walker(&[1.0, 2.0], 5),
            Err(MathError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_ar_forecast_recursion() {
        let forecasts = ar_forecast(&[4.0, 8.0], &[0.5], 3).unwrap();
        assert_eq!(forecasts, vec![4.0, 2.0, 1.0]);
    }

    #[test]
    fn test_ar_forecast_uses_most_recent_lag_first() {
        // x_t = 1.0 * x_{t-1} + 0.0 * x_{t-2}
        let forecasts = ar_forecast(&[1.0, 2.0, 3.0], &[1.0, 0.0], 2).unwrap();
        assert_eq!(forecasts, vec![3.0, 3.0]);
    }
}
