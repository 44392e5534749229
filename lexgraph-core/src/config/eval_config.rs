use serde::{Deserialize, Serialize};

use super::defaults;

/// Evaluation harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Directory where `results.jsonl` and `summary.csv` are written.
    pub out_dir: String,
    /// Evaluate at most this many questions (0 = all).
    pub limit: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            out_dir: defaults::EVAL_OUT_DIR.to_string(),
            limit: 0,
        }
    }
}
