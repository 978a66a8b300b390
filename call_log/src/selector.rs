//! Ranking API identifiers by call frequency

use crate::loader::CallLog;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of calls logged for one identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFrequency {
    /// API identifier
    pub api_code: String,
    /// Number of rows with this identifier
    pub calls: usize,
}

impl CallLog {
    /// Every identifier with its call count, most called first
    ///
    /// Identifiers with equal counts keep the order in which they first
    /// appear in the log.
    pub fn api_frequencies(&self) -> Vec<ApiFrequency> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut frequencies: Vec<ApiFrequency> = Vec::new();

        for code in self.api_codes() {
            match positions.get(code) {
                Some(&idx) => frequencies[idx].calls += 1,
                None => {
                    positions.insert(code, frequencies.len());
                    frequencies.push(ApiFrequency {
                        api_code: code.to_string(),
                        calls: 1,
                    });
                }
            }
        }

        // Stable sort preserves first-appearance order among ties
        frequencies.sort_by(|a, b| b.calls.cmp(&a.calls));
        frequencies
    }

    /// The `n` most frequently called identifiers
    ///
    /// Asking for more identifiers than exist returns all of them.
    pub fn top_apis(&self, n: usize) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }
        self.api_frequencies()
            .into_iter()
            .take(n)
            .map(|f| f.api_code)
            .collect()
    }
}
