//! Report writing: `results.jsonl` (one record per line) and `summary.csv`
//! (one row per strategy).

use std::fmt::Write as _;
use std::path::Path;

use lexgraph_core::errors::EvalError;
use lexgraph_core::models::{EvalRecord, EvalSummary};

fn write_error(path: &Path, reason: impl ToString) -> EvalError {
    EvalError::ReportWrite {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// One serde_json line per evaluation record.
pub fn write_jsonl(path: &Path, records: &[EvalRecord]) -> Result<(), EvalError> {
    let mut out = String::new();
    for record in records {
        let line = serde_json::to_string(record).map_err(|e| write_error(path, e))?;
        out.push_str(&line);
        out.push('\n');
    }
    std::fs::write(path, out).map_err(|e| write_error(path, e))
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.4}")).unwrap_or_default()
}

/// Per-strategy summary table.
pub fn write_summary_csv(path: &Path, summaries: &[EvalSummary]) -> Result<(), EvalError> {
    let mut out = String::from(
        "strategy,n,ok,error,ok_rate,fallback,f1_mean,f1_median,ms_p50,ms_p95,rows_mean\n",
    );
    for s in summaries {
        let _ = writeln!(
            out,
            "{},{},{},{},{:.4},{},{},{},{},{},{:.2}",
            csv_field(&s.strategy),
            s.n,
            s.ok,
            s.error,
            s.ok_rate,
            s.fallback,
            opt(s.f1_mean),
            opt(s.f1_median),
            opt(s.ms_p50),
            opt(s.ms_p95),
            s.rows_mean,
        );
    }
    std::fs::write(path, out).map_err(|e| write_error(path, e))
}

/// Write both reports under `out_dir`, creating it when missing.
pub fn write_reports(
    out_dir: &Path,
    records: &[EvalRecord],
    summaries: &[EvalSummary],
) -> Result<(), EvalError> {
    std::fs::create_dir_all(out_dir).map_err(|e| write_error(out_dir, e))?;
    write_jsonl(&out_dir.join("results.jsonl"), records)?;
    write_summary_csv(&out_dir.join("summary.csv"), summaries)
}
