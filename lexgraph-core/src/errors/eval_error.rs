/// Evaluation-harness errors (dataset IO and report writing).
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("failed to read question set {path}: {reason}")]
    DatasetRead { path: String, reason: String },

    #[error("malformed question row {line}: {reason}")]
    DatasetParse { line: usize, reason: String },

    #[error("failed to write report {path}: {reason}")]
    ReportWrite { path: String, reason: String },
}
