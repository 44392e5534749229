//! Batch evaluation driver.
//!
//! One (question × strategy) trial per record, all generation routed through
//! the same orchestrator the interactive path uses. A malformed question or
//! a failing trial never aborts the batch: every outcome becomes a record.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info};

use lexgraph_core::models::{AnswerStatus, EvalRecord, EvalSummary};
use lexgraph_nl2cypher::{GenerationEngine, GenerationMode};

use crate::dataset::QuestionRecord;
use crate::{extract, metrics};

/// Run every question through every strategy and score against ground truth.
pub fn evaluate(
    questions: &[QuestionRecord],
    modes: &[GenerationMode],
    engine: &GenerationEngine<'_>,
) -> (Vec<EvalRecord>, Vec<EvalSummary>) {
    let mut records = Vec::with_capacity(questions.len() * modes.len());

    for question in questions {
        let gold = question.gold_ids();
        for &mode in modes {
            debug!(qid = ?question.qid, strategy = %mode, "evaluating");
            records.push(run_trial(question, gold.as_ref(), mode, engine));
        }
    }

    let summaries = summarize(&records, modes);
    info!(
        trials = records.len(),
        strategies = modes.len(),
        "evaluation finished"
    );
    (records, summaries)
}

fn run_trial(
    question: &QuestionRecord,
    gold: Option<&BTreeSet<String>>,
    mode: GenerationMode,
    engine: &GenerationEngine<'_>,
) -> EvalRecord {
    let answer = engine.answer(&question.question, mode);
    let uses_model = matches!(mode, GenerationMode::ModelOnly | GenerationMode::Auto);

    let (precision, recall, f1) = match (gold, answer.status) {
        (Some(gold), AnswerStatus::Ok) => {
            let pred: BTreeSet<String> = extract::extract_ids(&answer.rows)
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect();
            let (p, r, f) = metrics::prf(&pred, gold);
            (Some(p), Some(r), Some(f))
        }
        _ => (None, None, None),
    };

    let error = match answer.status {
        AnswerStatus::NoQuery => Some("no_cypher".to_string()),
        AnswerStatus::Unsafe => Some("unsafe_cypher".to_string()),
        _ => answer.error.clone(),
    };

    EvalRecord {
        ts: Utc::now(),
        qid: question.qid.clone(),
        question: question.question.clone(),
        strategy: mode.to_string(),
        generator: answer.query.as_ref().map(|q| q.generator.to_string()),
        model: if uses_model {
            engine.model_name().map(str::to_string)
        } else {
            None
        },
        fallback_used: answer.fallback_used,
        status: answer.status,
        precision,
        recall,
        f1,
        rows: answer.row_count(),
        ms: answer.elapsed_ms,
        cypher: answer.query.map(|q| q.text).unwrap_or_default(),
        error,
    }
}

/// Per-strategy aggregates, fully recomputed from the record batch.
pub fn summarize(records: &[EvalRecord], modes: &[GenerationMode]) -> Vec<EvalSummary> {
    modes
        .iter()
        .map(|mode| {
            let strategy = mode.to_string();
            let recs: Vec<&EvalRecord> =
                records.iter().filter(|r| r.strategy == strategy).collect();

            let n = recs.len();
            let ok = recs
                .iter()
                .filter(|r| r.status == AnswerStatus::Ok)
                .count();
            let f1s: Vec<f64> = recs.iter().filter_map(|r| r.f1).collect();
            let latencies: Vec<f64> = recs.iter().filter_map(|r| r.ms).map(|ms| ms as f64).collect();
            let rows: Vec<f64> = recs.iter().map(|r| r.rows as f64).collect();

            EvalSummary {
                strategy,
                n,
                ok,
                error: n - ok,
                ok_rate: if n == 0 { 0.0 } else { ok as f64 / n as f64 },
                fallback: recs.iter().filter(|r| r.fallback_used).count(),
                f1_mean: metrics::mean(&f1s),
                f1_median: metrics::median(&f1s),
                ms_p50: metrics::percentile(&latencies, 0.5),
                ms_p95: metrics::percentile(&latencies, 0.95),
                rows_mean: metrics::mean(&rows).unwrap_or(0.0),
            }
        })
        .collect()
}
