//! Bounded Nelder-Mead simplex minimisation
//!
//! Used to estimate smoothing parameters by minimising the in-sample sum of
//! squared one-step-ahead errors. Every candidate point is clamped into its
//! box bounds before evaluation, and non-finite objective values are treated
//! as `f64::MAX` so a diverging candidate is never preferred.

use crate::{MathError, Result};
use std::cmp::Ordering;

/// Configuration for Nelder-Mead minimisation
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations
    pub max_iter: usize,
    /// Stop once the spread of objective values across the simplex drops below this
    pub tolerance: f64,
    /// Relative size of the initial simplex around the starting point
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-10,
            initial_step: 0.05,
        }
    }
}

/// Result of a minimisation
#[derive(Debug, Clone)]
pub struct Minimum {
    /// Best point found
    pub point: Vec<f64>,
    /// Objective value at `point`
    pub value: f64,
    /// Iterations performed
    pub iterations: usize,
    /// Whether the tolerance was reached before `max_iter`
    pub converged: bool,
}

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimise `objective` starting from `start`, keeping each coordinate inside `bounds`
///
/// Use `(f64::NEG_INFINITY, f64::INFINITY)` for an unbounded coordinate.
pub fn nelder_mead<F>(
    objective: F,
    start: &[f64],
    bounds: &[(f64, f64)],
    config: &NelderMeadConfig,
) -> Result<Minimum>
where
    F: Fn(&[f64]) -> f64,
{
    let n = start.len();
    if n == 0 {
        return Err(MathError::InvalidInput(
            "Starting point must have at least one coordinate".to_string(),
        ));
    }
    if bounds.len() != n {
        return Err(MathError::InvalidInput(format!(
            "Expected {} bounds, got {}",
            n,
            bounds.len()
        )));
    }
    if bounds.iter().any(|(lo, hi)| lo > hi) {
        return Err(MathError::InvalidInput(
            "Lower bound exceeds upper bound".to_string(),
        ));
    }

    let eval = |point: &[f64]| {
        let value = objective(point);
        if value.is_finite() {
            value
        } else {
            f64::MAX
        }
    };

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(clamp(start, bounds));
    for i in 0..n {
        let mut vertex = start.to_vec();
        let step = if start[i].abs() > 1e-8 {
            config.initial_step * start[i].abs()
        } else {
            config.initial_step
        };
        vertex[i] += step;
        // Step inward when the nudge lands on the upper bound
        if vertex[i] > bounds[i].1 {
            vertex[i] = start[i] - step;
        }
        simplex.push(clamp(&vertex, bounds));
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| eval(v)).collect();

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        if (values[worst] - values[best]).abs() <= config.tolerance {
            converged = true;
            break;
        }

        let centroid = centroid(&simplex, worst);

        let reflected = clamp(&towards(&centroid, &simplex[worst], -REFLECTION), bounds);
        let reflected_value = eval(&reflected);

        if reflected_value < values[best] {
            let expanded = clamp(&towards(&centroid, &reflected, EXPANSION), bounds);
            let expanded_value = eval(&expanded);
            if expanded_value < reflected_value {
                simplex[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                simplex[worst] = reflected;
                values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = reflected_value;
            continue;
        }

        let (contracted, limit) = if reflected_value < values[worst] {
            (towards(&centroid, &reflected, CONTRACTION), reflected_value)
        } else {
            (towards(&centroid, &simplex[worst], CONTRACTION), values[worst])
        };
        let contracted = clamp(&contracted, bounds);
        let contracted_value = eval(&contracted);
        if contracted_value < limit {
            simplex[worst] = contracted;
            values[worst] = contracted_value;
            continue;
        }

        let anchor = simplex[best].clone();
        for i in 0..=n {
            if i != best {
                let shrunk = towards(&anchor, &simplex[i], SHRINK);
                simplex[i] = clamp(&shrunk, bounds);
                values[i] = eval(&simplex[i]);
            }
        }
    }

    let best = values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    Ok(Minimum {
        point: simplex[best].clone(),
        value: values[best],
        iterations,
        converged,
    })
}

/// `origin + factor * (point - origin)`
fn towards(origin: &[f64], point: &[f64], factor: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(point)
        .map(|(o, p)| o + factor * (p - o))
        .collect()
}

fn centroid(simplex: &[Vec<f64>], exclude: usize) -> Vec<f64> {
    let dims = simplex[0].len();
    let count = (simplex.len() - 1) as f64;
    let mut centre = vec![0.0; dims];
    for (i, vertex) in simplex.iter().enumerate() {
        if i == exclude {
            continue;
        }
        for (c, v) in centre.iter_mut().zip(vertex) {
            *c += v;
        }
    }
    centre.iter_mut().for_each(|c| *c /= count);
    centre
}

fn clamp(point: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    point
        .iter()
        .zip(bounds)
        .map(|(&x, &(lo, hi))| x.clamp(lo, hi))
        .collect()
}
