//! Chronological hold-out evaluation and model selection
//!
//! A daily series is split into a training prefix and a test suffix. Each
//! model is fitted on the prefix in isolation, forecasts the length of the
//! suffix and is scored by mean squared error. A model that cannot be
//! fitted or that produces a non-finite forecast is recorded with an
//! undefined forecast and an infinite score instead of aborting the run.

use crate::error::{ForecastError, Result};
use crate::models::arima::ArimaModel;
use crate::models::exponential_smoothing::SimpleExponentialSmoothing;
use crate::models::holt_winters::{HoltWinters, WEEKLY_PERIOD};
use crate::models::{ForecastModel, ForecastResult, ModelChoice, ModelKind, TrainedForecastModel};
use call_log::DailySeries;
use chrono::NaiveDate;
use forecast_math::stats::SummaryStatistics;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest daily observations that still leave a non-empty test split
pub const MIN_OBSERVATIONS: usize = 2;

/// Fixed evaluation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Share of the series used for training
    pub train_ratio: f64,
    /// Seasonal period for Holt-Winters, in days
    pub seasonal_period: usize,
    /// ARIMA `(p, d, q)` order
    pub arima_order: (usize, usize, usize),
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            train_ratio: 0.8,
            seasonal_period: WEEKLY_PERIOD,
            arima_order: (5, 1, 0),
        }
    }
}

impl EvaluatorConfig {
    /// Check that the constants describe a usable evaluation
    pub fn validate(&self) -> Result<()> {
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Train ratio must be strictly between 0 and 1, got {}",
                self.train_ratio
            )));
        }
        if self.seasonal_period < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "Seasonal period must be at least 2, got {}",
                self.seasonal_period
            )));
        }
        if self.arima_order.2 > 0 {
            return Err(ForecastError::InvalidParameter(
                "ARIMA moving-average order must be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Index of the first test observation: `floor(train_ratio * len)`
    pub fn split_index(&self, len: usize) -> usize {
        ((len as f64 * self.train_ratio).floor() as usize).min(len)
    }
}

/// A series cut into a training prefix and a test suffix
#[derive(Debug, Clone)]
pub struct Split {
    /// Leading observations used for fitting
    pub train: DailySeries,
    /// Trailing observations used for scoring
    pub test: DailySeries,
}

impl Split {
    /// Split `series` at `config.split_index(series.len())`
    pub fn new(series: &DailySeries, config: &EvaluatorConfig) -> Self {
        let (train, test) = series.split_at(config.split_index(series.len()));
        Self { train, test }
    }
}

/// One model's forecast and score over the test split
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelRun {
    /// Which model produced this run
    pub model: ModelKind,
    /// One value per test day; `None` when the model failed
    pub forecast: Vec<Option<f64>>,
    /// Mean squared error against the test split; infinite on failure
    pub mse: f64,
    /// Why the model failed, if it did
    pub failure: Option<String>,
}

impl ModelRun {
    fn succeeded(model: ModelKind, forecast: ForecastResult, mse: f64) -> Self {
        Self {
            model,
            forecast: forecast.into_values().into_iter().map(Some).collect(),
            mse,
            failure: None,
        }
    }

    fn failed(model: ModelKind, horizon: usize, reason: String) -> Self {
        Self {
            model,
            forecast: vec![None; horizon],
            mse: f64::INFINITY,
            failure: Some(reason),
        }
    }

    /// Whether the run has a finite score
    pub fn is_usable(&self) -> bool {
        self.mse.is_finite()
    }
}

/// Scores of every model for one API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    api_code: String,
    train_len: usize,
    test_dates: Vec<NaiveDate>,
    actual: Vec<f64>,
    runs: Vec<ModelRun>,
    selected: ModelKind,
    summary: Option<SummaryStatistics>,
}

impl Evaluation {
    /// API the evaluation was run for
    pub fn api_code(&self) -> &str {
        &self.api_code
    }

    /// Number of training days
    pub fn train_len(&self) -> usize {
        self.train_len
    }

    /// Dates of the test split
    pub fn test_dates(&self) -> &[NaiveDate] {
        &self.test_dates
    }

    /// Observed counts over the test split
    pub fn actual(&self) -> &[f64] {
        &self.actual
    }

    /// Runs in fixed SES, Holt-Winters, ARIMA order
    pub fn runs(&self) -> &[ModelRun] {
        &self.runs
    }

    /// Model with the lowest score; SES when every model failed
    pub fn selected(&self) -> ModelKind {
        self.selected
    }

    /// Summary statistics of the full daily series
    pub fn summary(&self) -> Option<&SummaryStatistics> {
        self.summary.as_ref()
    }

    /// Run for a specific model
    pub fn run(&self, kind: ModelKind) -> Option<&ModelRun> {
        self.runs.iter().find(|run| run.model == kind)
    }

    /// Whether at least one model produced a finite score
    pub fn has_usable_forecast(&self) -> bool {
        self.runs.iter().any(ModelRun::is_usable)
    }

    /// The selected run, or `None` when every model failed
    pub fn best_run(&self) -> Option<&ModelRun> {
        if self.has_usable_forecast() {
            self.run(self.selected)
        } else {
            None
        }
    }

    /// The run to present for a user's model choice
    pub fn forecast_for(&self, choice: ModelChoice) -> Option<&ModelRun> {
        match choice {
            ModelChoice::Best => self.best_run(),
            ModelChoice::Model(kind) => self.run(kind),
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "API: {}", self.api_code)?;
        writeln!(
            f,
            "Train days: {}, test days: {}",
            self.train_len,
            self.test_dates.len()
        )?;
        for run in &self.runs {
            match &run.failure {
                None => writeln!(f, "  {:<14}MSE {:.4}", run.model.label(), run.mse)?,
                Some(reason) => writeln!(f, "  {:<14}failed: {}", run.model.label(), reason)?,
            }
        }
        match self.best_run() {
            Some(run) => write!(f, "Best model: {}", run.model),
            None => write!(f, "No usable forecast"),
        }
    }
}

/// Result of evaluating one API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationOutcome {
    /// The API has no usable calls
    NoData {
        /// API that was requested
        api_code: String,
    },
    /// Too few days to split into train and test
    InsufficientData {
        /// API that was requested
        api_code: String,
        /// Days in the series
        observations: usize,
        /// Days required
        required: usize,
    },
    /// Models were fitted and scored
    Evaluated(Evaluation),
}

impl EvaluationOutcome {
    /// The evaluation, if models were scored
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            EvaluationOutcome::Evaluated(evaluation) => Some(evaluation),
            _ => None,
        }
    }

    /// Serialize to pretty JSON; infinite scores become `null`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for EvaluationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationOutcome::NoData { api_code } => {
                write!(f, "No data available for API '{}'", api_code)
            }
            EvaluationOutcome::InsufficientData {
                api_code,
                observations,
                required,
            } => write!(
                f,
                "Not enough data for API '{}': {} day(s), need at least {}",
                api_code, observations, required
            ),
            EvaluationOutcome::Evaluated(evaluation) => evaluation.fmt(f),
        }
    }
}

/// Fits the three models and picks the lowest-error one
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EvaluatorConfig,
    ses: SimpleExponentialSmoothing,
    holt_winters: HoltWinters,
    arima: ArimaModel,
}

impl Evaluator {
    /// Create an evaluator from validated constants
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        let (p, d, q) = config.arima_order;

        Ok(Self {
            ses: SimpleExponentialSmoothing::new(),
            holt_winters: HoltWinters::new(config.seasonal_period)?,
            arima: ArimaModel::new(p, d, q)?,
            config,
        })
    }

    /// Constants in use
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate every model on `series` for `api_code`
    pub fn evaluate(&self, api_code: &str, series: &DailySeries) -> EvaluationOutcome {
        log::info!("API: {}", api_code);

        if series.is_empty() {
            log::info!("No calls recorded for {}", api_code);
            return EvaluationOutcome::NoData {
                api_code: api_code.to_string(),
            };
        }

        let summary = SummaryStatistics::describe(&series.values());
        if let Some(stats) = &summary {
            log::info!("Daily call counts for {}:\n{}", api_code, stats);
        }

        if series.len() < MIN_OBSERVATIONS {
            log::warn!(
                "{} has {} day(s) of calls, need at least {} to evaluate",
                api_code,
                series.len(),
                MIN_OBSERVATIONS
            );
            return EvaluationOutcome::InsufficientData {
                api_code: api_code.to_string(),
                observations: series.len(),
                required: MIN_OBSERVATIONS,
            };
        }

        let split = Split::new(series, &self.config);
        let actual = split.test.values();
        log::debug!(
            "Split {} into {} training and {} test days",
            api_code,
            split.train.len(),
            split.test.len()
        );

        let runs: Vec<ModelRun> = ModelKind::ALL
            .iter()
            .map(|&kind| self.run_model(kind, &split.train, &actual))
            .collect();

        let mut selected = ModelKind::Ses;
        let mut best = f64::INFINITY;
        for run in &runs {
            log::debug!("{} MSE: {}", run.model, run.mse);
            if run.mse < best {
                best = run.mse;
                selected = run.model;
            }
        }

        if best.is_finite() {
            log::info!("Best model for {}: {} (MSE {:.4})", api_code, selected, best);
        } else {
            log::warn!("No usable forecast for {}", api_code);
        }

        EvaluationOutcome::Evaluated(Evaluation {
            api_code: api_code.to_string(),
            train_len: split.train.len(),
            test_dates: split.test.dates(),
            actual,
            runs,
            selected,
            summary,
        })
    }

    fn run_model(&self, kind: ModelKind, train: &DailySeries, actual: &[f64]) -> ModelRun {
        let horizon = actual.len();
        let scored = match kind {
            ModelKind::Ses => score(&self.ses, train, actual),
            ModelKind::HoltWinters => score(&self.holt_winters, train, actual),
            ModelKind::Arima => score(&self.arima, train, actual),
        };

        match scored {
            Ok((forecast, mse)) => ModelRun::succeeded(kind, forecast, mse),
            Err(e) => {
                log::warn!("{} error: {}", kind, e);
                ModelRun::failed(kind, horizon, e.to_string())
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            config: EvaluatorConfig::default(),
            ses: SimpleExponentialSmoothing::default(),
            holt_winters: HoltWinters::default(),
            arima: ArimaModel::default(),
        }
    }
}

/// Fit `model` on `train`, forecast `actual.len()` days and score the forecast
fn score<M: ForecastModel>(
    model: &M,
    train: &DailySeries,
    actual: &[f64],
) -> Result<(ForecastResult, f64)> {
    let trained = model.train(train)?;
    let forecast = trained.forecast(actual.len())?;
    if !forecast.is_finite() {
        return Err(ForecastError::ForecastingError(format!(
            "{} produced a non-finite forecast",
            trained.name()
        )));
    }

    let mse = forecast.mean_squared_error(actual)?;
    if !mse.is_finite() {
        return Err(ForecastError::ForecastingError(format!(
            "{} produced a non-finite score",
            trained.name()
        )));
    }

    Ok((forecast, mse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn series(counts: &[u64]) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        DailySeries::from_counts(start, counts).unwrap()
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 1)]
    #[case(5, 4)]
    #[case(9, 7)]
    #[case(10, 8)]
    #[case(31, 24)]
    fn test_split_index(#[case] len: usize, #[case] expected: usize) {
        assert_eq!(EvaluatorConfig::default().split_index(len), expected);
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    #[case(-0.2)]
    #[case(f64::NAN)]
    fn test_rejects_bad_train_ratio(#[case] ratio: f64) {
        let config = EvaluatorConfig {
            train_ratio: ratio,
            ..EvaluatorConfig::default()
        };
        assert!(Evaluator::new(config).is_err());
    }

    #[test]
    fn test_failed_run_is_never_selected_over_a_usable_one() {
        // Three training days: SES fits, the others do not
        let outcome = Evaluator::default().evaluate("TINY", &series(&[4, 6, 5, 5]));
        let evaluation = outcome.evaluation().unwrap();

        assert_eq!(evaluation.selected(), ModelKind::Ses);
        assert!(evaluation.run(ModelKind::Ses).unwrap().is_usable());
        for kind in [ModelKind::HoltWinters, ModelKind::Arima] {
            let run = evaluation.run(kind).unwrap();
            assert!(run.mse.is_infinite());
            assert_eq!(run.forecast, vec![None]);
            assert!(run.failure.is_some());
        }
    }

    #[test]
    fn test_every_model_failing_leaves_no_usable_forecast() {
        let evaluation = Evaluation {
            api_code: "DOWN".to_string(),
            train_len: 8,
            test_dates: series(&[0, 0, 0, 0, 0, 0, 0, 0, 3, 4]).dates()[8..].to_vec(),
            actual: vec![3.0, 4.0],
            runs: ModelKind::ALL
                .iter()
                .map(|&kind| ModelRun::failed(kind, 2, "fit failed".to_string()))
                .collect(),
            selected: ModelKind::Ses,
            summary: None,
        };

        assert!(!evaluation.has_usable_forecast());
        assert!(evaluation.best_run().is_none());
        assert!(evaluation.forecast_for(ModelChoice::Best).is_none());
        assert_eq!(evaluation.selected(), ModelKind::Ses);
        assert!(evaluation.to_string().ends_with("No usable forecast"));

        let json = EvaluationOutcome::Evaluated(evaluation).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for run in value["runs"].as_array().unwrap() {
            assert!(run["mse"].is_null());
            assert_eq!(run["forecast"], serde_json::json!([null, null]));
        }
    }

    #[test]
    fn test_display_lists_every_model() {
        let outcome = Evaluator::default().evaluate("TINY", &series(&[4, 6, 5, 5]));
        let text = outcome.to_string();

        assert!(text.starts_with("API: TINY"));
        assert!(text.contains("SES"));
        assert!(text.contains("Holt-Winters"));
        assert!(text.contains("ARIMA"));
        assert!(text.ends_with("Best model: SES"));
    }
}
