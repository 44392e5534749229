use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::answer::AnswerStatus;

/// One evaluation trial: (question × strategy). Appended to the evaluation
/// log as a JSONL line; never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRecord {
    /// UTC timestamp of the trial.
    pub ts: DateTime<Utc>,
    /// Question id from the dataset, when present.
    pub qid: Option<String>,
    pub question: String,
    /// Strategy name as requested ("rules", "model", "auto").
    pub strategy: String,
    /// Final generator tag ("rules", "fallback", "rescue(rules)", ...).
    pub generator: Option<String>,
    /// Model name, for model-backed strategies.
    pub model: Option<String>,
    pub fallback_used: bool,
    pub status: AnswerStatus,
    /// Present only when the question has ground truth.
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
    pub rows: usize,
    /// Execution latency in milliseconds, when a query ran.
    pub ms: Option<u64>,
    pub cypher: String,
    pub error: Option<String>,
}

/// Per-strategy aggregate over a batch of [`EvalRecord`]s.
/// Fully recomputed on each evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub strategy: String,
    pub n: usize,
    pub ok: usize,
    pub error: usize,
    pub ok_rate: f64,
    /// Trials where fallback or rescue engaged.
    pub fallback: usize,
    /// Mean/median F1 over trials that had ground truth.
    pub f1_mean: Option<f64>,
    pub f1_median: Option<f64>,
    pub ms_p50: Option<f64>,
    pub ms_p95: Option<f64>,
    pub rows_mean: f64,
}
