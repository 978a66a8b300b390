//! Descriptive statistics for diagnostic logging

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};
use std::fmt;

/// Count, centre, spread and quartiles of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of observations
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation, `None` for fewer than two observations
    pub std_dev: Option<f64>,
    /// Smallest observation
    pub min: f64,
    /// First quartile
    pub lower_quartile: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub upper_quartile: f64,
    /// Largest observation
    pub max: f64,
}

impl SummaryStatistics {
    /// Summarise `values`; `None` when there is nothing to summarise
    pub fn describe(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut data = Data::new(values.to_vec());
        let mean = data.mean()?;
        let std_dev = if values.len() > 1 { data.std_dev() } else { None };

        Some(Self {
            count: values.len(),
            mean,
            std_dev,
            min: data.min(),
            lower_quartile: data.lower_quartile(),
            median: data.median(),
            upper_quartile: data.upper_quartile(),
            max: data.max(),
        })
    }
}

impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count  {}", self.count)?;
        writeln!(f, "mean   {:.4}", self.mean)?;
        match self.std_dev {
            Some(std_dev) => writeln!(f, "std    {:.4}", std_dev)?,
            None => writeln!(f, "std    NaN")?,
        }
        writeln!(f, "min    {:.4}", self.min)?;
        writeln!(f, "25%    {:.4}", self.lower_quartile)?;
        writeln!(f, "50%    {:.4}", self.median)?;
        writeln!(f, "75%    {:.4}", self.upper_quartile)?;
        write!(f, "max    {:.4}", self.max)
    }
}
