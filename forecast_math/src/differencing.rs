//! Differencing and integration of series

use crate::{MathError, Result};

/// Apply `d` rounds of first differencing
///
/// Each round shortens the series by one; a series of length `<= d` yields
/// an empty vector.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut current = series.to_vec();
    for _ in 0..d {
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
    }
    current
}

/// Undo `d` rounds of differencing for values that continue `history`
///
/// `differenced` holds future values on the `d`-times differenced scale; the
/// result holds the same future values on the original scale.
pub fn integrate(differenced: &[f64], history: &[f64], d: usize) -> Result<Vec<f64>> {
    if d == 0 {
        return Ok(differenced.to_vec());
    }
    if history.len() < d {
        return Err(MathError::InsufficientData(format!(
            "Integrating {} difference(s) needs at least {} historical points, got {}",
            d,
            d,
            history.len()
        )));
    }

    let mut values = differenced.to_vec();
    for order in (0..d).rev() {
        let anchor_series = difference(history, order);
        let mut running = *anchor_series.last().ok_or_else(|| {
            MathError::CalculationError("Differenced history is empty".to_string())
        })?;
        for value in values.iter_mut() {
            running += *value;
            *value = running;
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(difference(&[1.0, 4.0, 9.0, 16.0], 1), vec![3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_second_difference() {
        assert_eq!(difference(&[1.0, 4.0, 9.0, 16.0], 2), vec![2.0, 2.0]);
    }

    #[test]
    fn test_difference_of_short_series_is_empty() {
        assert!(difference(&[1.0], 1).is_empty());
        assert!(difference(&[], 1).is_empty());
    }

    #[test]
    fn test_integrate_continues_history() {
        let history = [10.0, 12.0, 11.0];
        let future = integrate(&[1.0, -2.0, 0.5], &history, 1).unwrap();
        assert_eq!(future, vec![12.0, 10.0, 10.5]);
    }

    #[test]
    fn test_integrate_second_order() {
        // Squares: second differences are constant at 2
        let history = [1.0, 4.0, 9.0, 16.0];
        let future = integrate(&[2.0, 2.0], &history, 2).unwrap();
        assert_eq!(future, vec![25.0, 36.0]);
    }

    #[test]
    fn test_integrate_needs_history() {
        assert!(integrate(&[1.0], &[], 1).is_err());
    }
}
