//! Runtime configuration read from the environment

use crate::{OracleError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable naming the call log to load
pub const DATASET_VAR: &str = "CALL_ORACLE_DATASET";
/// Environment variable holding the default log filter
pub const LOG_VAR: &str = "CALL_ORACLE_LOG";
/// Environment variable holding the default number of APIs to rank
pub const TOP_N_VAR: &str = "CALL_ORACLE_TOP_N";

/// Dataset read when nothing else is configured
pub const DEFAULT_DATASET: &str = "API Call Dataset.csv";

/// Settings for the call oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Path of the CSV call log
    pub dataset: PathBuf,
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub log_filter: String,
    /// How many APIs `top` lists by default
    pub top_n: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET),
            log_filter: "info".to_string(),
            top_n: 10,
        }
    }
}

impl OracleConfig {
    /// Read settings from the process environment
    ///
    /// Call `dotenv().ok()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dataset) = lookup(DATASET_VAR).filter(|v| !v.trim().is_empty()) {
            config.dataset = PathBuf::from(dataset);
        }
        if let Some(filter) = lookup(LOG_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(top_n) = lookup(TOP_N_VAR) {
            config.top_n = top_n.trim().parse().map_err(|_| {
                OracleError::Config(format!(
                    "{} must be a non-negative integer, got '{}'",
                    TOP_N_VAR, top_n
                ))
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = OracleConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, OracleConfig::default());
        assert_eq!(config.dataset, PathBuf::from("API Call Dataset.csv"));
    }

    #[test]
    fn test_overrides() {
        let config = OracleConfig::from_lookup(lookup(&[
            (DATASET_VAR, "/data/calls.csv"),
            (LOG_VAR, "debug"),
            (TOP_N_VAR, " 3 "),
        ]))
        .unwrap();

        assert_eq!(config.dataset, PathBuf::from("/data/calls.csv"));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.top_n, 3);
    }

    #[test]
    fn test_bad_top_n() {
        let result = OracleConfig::from_lookup(lookup(&[(TOP_N_VAR, "many")]));
        assert!(matches!(result, Err(OracleError::Config(_))));
    }
}
