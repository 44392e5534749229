use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::query::GeneratedQuery;

/// One tabular result row: column name → JSON value.
///
/// The graph boundary is "submit query text, receive rows"; rows arrive in
/// whatever shape the collaborator produces, so cells stay dynamically typed.
pub type Row = BTreeMap<String, serde_json::Value>;

/// Outcome of answering one question. The three failure shapes stay
/// distinguishable in both the interactive and batch paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    /// Query executed; rows (possibly zero) returned.
    Ok,
    /// No generator produced a usable query.
    NoQuery,
    /// The only candidate query contained a denied mutation keyword.
    Unsafe,
    /// The collaborator raised while running the query.
    #[serde(rename = "error")]
    ExecutionError,
}

impl std::fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AnswerStatus::Ok => "ok",
            AnswerStatus::NoQuery => "no_query",
            AnswerStatus::Unsafe => "unsafe",
            AnswerStatus::ExecutionError => "error",
        };
        f.write_str(s)
    }
}

/// Request-scoped result of the full pipeline for one question.
#[derive(Debug, Clone)]
pub struct Answer {
    pub status: AnswerStatus,
    /// The query that was (or would have been) executed.
    pub query: Option<GeneratedQuery>,
    pub rows: Vec<Row>,
    /// Execution latency of the final query, when one ran.
    pub elapsed_ms: Option<u64>,
    pub error: Option<String>,
    /// Pre-execution fallback or post-execution rescue engaged.
    pub fallback_used: bool,
}

impl Answer {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the executed query was the diagnostic sentinel; callers
    /// treat this as "no usable result" regardless of the constant row.
    pub fn is_sentinel(&self) -> bool {
        self.query.as_ref().is_some_and(GeneratedQuery::is_sentinel)
    }
}
