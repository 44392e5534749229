//! GenerationEngine: orchestrates generators, post-processing, safety
//! validation, and the two-stage escalation.
//!
//! Pre-execution fallback handles total generation failure (auto mode:
//! model produced nothing → rules). Post-execution rescue handles generation
//! that "succeeds" syntactically but is semantically too narrow (row count
//! at or below the configured threshold → re-run with rules, keep whichever
//! returns more rows).

use std::time::Instant;

use tracing::{debug, info, warn};

use lexgraph_core::config::PipelineConfig;
use lexgraph_core::models::{Answer, AnswerStatus, GeneratedQuery, Generator};
use lexgraph_core::traits::{IGraphExecutor, IModelClient};

use crate::{canonical, intent, model, rewrite, safety, templates};

/// Strategy selection for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Rules generator only; no escalation.
    RulesOnly,
    /// Model generator only; an unavailable client or the explicit
    /// "cannot generate" sentinel ends the attempt.
    ModelOnly,
    /// Model primary with rules fallback, plus the post-execution rescue.
    Auto,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GenerationMode::RulesOnly => "rules",
            GenerationMode::ModelOnly => "model",
            GenerationMode::Auto => "auto",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rules" => Ok(GenerationMode::RulesOnly),
            "model" => Ok(GenerationMode::ModelOnly),
            "auto" => Ok(GenerationMode::Auto),
            other => Err(format!("unknown generation mode '{other}'")),
        }
    }
}

/// Outcome of the generation stage, before execution.
#[derive(Debug)]
pub struct Generated {
    pub query: Option<GeneratedQuery>,
    /// The candidate was discarded by the safety validator.
    pub unsafe_rejected: bool,
}

/// The one orchestrator both the interactive and the batch paths use.
pub struct GenerationEngine<'a> {
    executor: &'a dyn IGraphExecutor,
    model: Option<&'a dyn IModelClient>,
    config: PipelineConfig,
}

impl<'a> GenerationEngine<'a> {
    pub fn new(executor: &'a dyn IGraphExecutor, config: PipelineConfig) -> Self {
        Self {
            executor,
            model: None,
            config,
        }
    }

    pub fn with_model(mut self, model: &'a dyn IModelClient) -> Self {
        self.model = Some(model);
        self
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.map(IModelClient::model_name)
    }

    /// Rule-based generation: canonicalize → classify → template.
    fn rules_text(&self, question: &str) -> String {
        let term = canonical::document_term(question);
        let intent = intent::classify(question, term.as_deref());
        debug!(%intent, term = ?term, "classified question");
        templates::build(question, intent, term.as_deref())
    }

    fn model_text(&self, question: &str) -> Option<String> {
        model::generate(self.model?, question)
    }

    /// Normalization chain applied to every generated query.
    fn post_process(text: &str, from_model: bool) -> String {
        let mut cy = rewrite::rectify_aliases(&rewrite::normalize_projection(text));
        if from_model {
            cy = rewrite::enforce_document_return(&cy);
        }
        cy
    }

    /// Generate a post-processed, safety-validated query.
    ///
    /// A query that fails the safety validator is discarded and reported as
    /// "no query produced" — it is never handed to an executor.
    pub fn generate(&self, question: &str, mode: GenerationMode) -> Generated {
        let raw: Option<(String, Generator)> = match mode {
            GenerationMode::RulesOnly => Some((self.rules_text(question), Generator::Rules)),
            GenerationMode::ModelOnly => self
                .model_text(question)
                .map(|text| (text, Generator::Model)),
            GenerationMode::Auto => match self.model_text(question) {
                Some(text) => Some((text, Generator::Model)),
                None => {
                    info!("primary generator yielded nothing; falling back to rules");
                    Some((self.rules_text(question), Generator::Fallback))
                }
            },
        };

        let Some((text, tag)) = raw else {
            return Generated {
                query: None,
                unsafe_rejected: false,
            };
        };

        let from_model = matches!(tag, Generator::Model);
        let cy = Self::post_process(&text, from_model);
        if !safety::is_safe(&cy) {
            warn!(generator = %tag, "generated query rejected by safety validator");
            return Generated {
                query: None,
                unsafe_rejected: true,
            };
        }
        Generated {
            query: Some(GeneratedQuery::new(cy, tag)),
            unsafe_rejected: false,
        }
    }

    /// Full pipeline for one question: generate, execute, escalate.
    pub fn answer(&self, question: &str, mode: GenerationMode) -> Answer {
        let generated = self.generate(question, mode);
        let Some(query) = generated.query else {
            let status = if generated.unsafe_rejected {
                AnswerStatus::Unsafe
            } else {
                AnswerStatus::NoQuery
            };
            return Answer {
                status,
                query: None,
                rows: Vec::new(),
                elapsed_ms: None,
                error: None,
                fallback_used: false,
            };
        };

        let fallback_used = matches!(query.generator, Generator::Fallback);
        let started = Instant::now();
        match self.executor.run(&query.text) {
            Ok(rows) => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                let mut answer = Answer {
                    status: AnswerStatus::Ok,
                    query: Some(query),
                    rows,
                    elapsed_ms: Some(elapsed_ms),
                    error: None,
                    fallback_used,
                };
                if mode == GenerationMode::Auto {
                    self.rescue(question, &mut answer);
                }
                answer
            }
            Err(err) => {
                let mut answer = Answer {
                    status: AnswerStatus::ExecutionError,
                    query: Some(query),
                    rows: Vec::new(),
                    elapsed_ms: None,
                    error: Some(err.to_string()),
                    fallback_used,
                };
                if mode == GenerationMode::Auto {
                    self.rescue(question, &mut answer);
                }
                answer
            }
        }
    }

    /// Post-execution rescue: when the accepted result is empty, near-empty,
    /// or the primary query failed outright, independently re-generate with
    /// rules and keep whichever query returns more rows. A failed primary
    /// counts as fewer rows than any successful execution, so a rules query
    /// that runs at all replaces it.
    fn rescue(&self, question: &str, answer: &mut Answer) {
        let primary_failed = answer.status == AnswerStatus::ExecutionError;
        if !primary_failed && answer.row_count() > self.config.rescue_row_threshold {
            return;
        }
        let candidate = Self::post_process(&self.rules_text(question), false);
        if !safety::is_safe(&candidate) {
            return;
        }
        if answer
            .query
            .as_ref()
            .is_some_and(|q| q.text == candidate)
        {
            // Identical query cannot return a different count.
            return;
        }

        let started = Instant::now();
        let rows = match self.executor.run(&candidate) {
            Ok(rows) => rows,
            // Rescue is best-effort; an execution error keeps the primary.
            Err(_) => return,
        };
        if !primary_failed && rows.len() <= answer.row_count() {
            return;
        }

        let prior = answer
            .query
            .take()
            .map(|q| q.generator)
            .unwrap_or(Generator::Model);
        info!(
            primary_failed,
            primary_rows = answer.row_count(),
            rescue_rows = rows.len(),
            "rescue replaced the primary query"
        );
        answer.status = AnswerStatus::Ok;
        answer.error = None;
        answer.query = Some(GeneratedQuery::new(
            candidate,
            Generator::Rescue(Box::new(prior)),
        ));
        answer.rows = rows;
        answer.elapsed_ms = Some(started.elapsed().as_millis() as u64);
        answer.fallback_used = true;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use lexgraph_core::errors::{ExecutionError, GenerationError};
    use lexgraph_core::models::Row;

    use super::*;

    /// Executor that returns a fixed number of rows depending on a marker
    /// substring, so generator provenance is observable from the outside.
    struct MarkerExecutor {
        marker: &'static str,
        rows_with_marker: usize,
        rows_without: usize,
    }

    impl MarkerExecutor {
        fn rows(n: usize) -> Vec<Row> {
            (0..n)
                .map(|i| {
                    let mut row = BTreeMap::new();
                    row.insert("id".to_string(), serde_json::json!(format!("doc-{i}")));
                    row
                })
                .collect()
        }
    }

    impl IGraphExecutor for MarkerExecutor {
        fn run(&self, query: &str) -> Result<Vec<Row>, ExecutionError> {
            if query.contains(self.marker) {
                Ok(Self::rows(self.rows_with_marker))
            } else {
                Ok(Self::rows(self.rows_without))
            }
        }
    }

    struct FixedModel(&'static str);

    impl IModelClient for FixedModel {
        fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }

        fn model_name(&self) -> &str {
            "fixed-test-model"
        }
    }

    struct FailingExecutor;

    impl IGraphExecutor for FailingExecutor {
        fn run(&self, _query: &str) -> Result<Vec<Row>, ExecutionError> {
            Err(ExecutionError::QueryFailed {
                reason: "boom".to_string(),
            })
        }
    }

    /// Errors on queries carrying the marker, succeeds on everything else.
    struct FailOnMarkerExecutor {
        marker: &'static str,
        rows_without: usize,
    }

    impl IGraphExecutor for FailOnMarkerExecutor {
        fn run(&self, query: &str) -> Result<Vec<Row>, ExecutionError> {
            if query.contains(self.marker) {
                Err(ExecutionError::QueryFailed {
                    reason: "boom".to_string(),
                })
            } else {
                Ok(MarkerExecutor::rows(self.rows_without))
            }
        }
    }

    const MODEL_QUERY: &str =
        "```cypher\nMATCH (d:Document) WHERE d.id = 'only-one' RETURN DISTINCT d.id AS id, d.title AS title\n```";

    #[test]
    fn rules_only_never_escalates() {
        let executor = MarkerExecutor {
            marker: "only-one",
            rows_with_marker: 1,
            rows_without: 0,
        };
        let engine = GenerationEngine::new(&executor, PipelineConfig::default());
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::RulesOnly);
        assert_eq!(answer.status, AnswerStatus::Ok);
        assert!(!answer.fallback_used);
        let query = answer.query.unwrap();
        assert_eq!(query.generator, Generator::Rules);
    }

    #[test]
    fn model_only_without_client_yields_no_query() {
        let executor = MarkerExecutor {
            marker: "x",
            rows_with_marker: 0,
            rows_without: 0,
        };
        let engine = GenerationEngine::new(&executor, PipelineConfig::default());
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::ModelOnly);
        assert_eq!(answer.status, AnswerStatus::NoQuery);
        assert!(answer.query.is_none());
    }

    #[test]
    fn auto_falls_back_to_rules_on_model_sentinel() {
        let executor = MarkerExecutor {
            marker: "never",
            rows_with_marker: 0,
            rows_without: 5,
        };
        let model = FixedModel("FALLBACK");
        let engine =
            GenerationEngine::new(&executor, PipelineConfig::default()).with_model(&model);
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::Auto);
        assert_eq!(answer.status, AnswerStatus::Ok);
        assert!(answer.fallback_used);
        assert_eq!(answer.query.unwrap().generator, Generator::Fallback);
    }

    #[test]
    fn rescue_replaces_narrow_model_result() {
        // Model query hits the marker (1 row); the rules query does not
        // (4 rows) — rescue must swap them and tag the composite generator.
        let executor = MarkerExecutor {
            marker: "only-one",
            rows_with_marker: 1,
            rows_without: 4,
        };
        let model = FixedModel(MODEL_QUERY);
        let engine =
            GenerationEngine::new(&executor, PipelineConfig::default()).with_model(&model);
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::Auto);
        assert_eq!(answer.status, AnswerStatus::Ok);
        assert_eq!(answer.row_count(), 4);
        assert!(answer.fallback_used);
        let tag = answer.query.unwrap().generator;
        assert_eq!(tag, Generator::Rescue(Box::new(Generator::Model)));
        assert_eq!(tag.to_string(), "rescue(model)");
    }

    #[test]
    fn rescue_keeps_primary_when_alternate_is_not_larger() {
        let executor = MarkerExecutor {
            marker: "only-one",
            rows_with_marker: 1,
            rows_without: 1,
        };
        let model = FixedModel(MODEL_QUERY);
        let engine =
            GenerationEngine::new(&executor, PipelineConfig::default()).with_model(&model);
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::Auto);
        assert_eq!(answer.row_count(), 1);
        assert_eq!(answer.query.unwrap().generator, Generator::Model);
    }

    #[test]
    fn rescue_skipped_when_primary_is_wide_enough() {
        let executor = MarkerExecutor {
            marker: "only-one",
            rows_with_marker: 3,
            rows_without: 10,
        };
        let model = FixedModel(MODEL_QUERY);
        let engine =
            GenerationEngine::new(&executor, PipelineConfig::default()).with_model(&model);
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::Auto);
        assert_eq!(answer.row_count(), 3);
        assert_eq!(answer.query.unwrap().generator, Generator::Model);
    }

    #[test]
    fn unsafe_model_query_is_discarded_not_executed() {
        let executor = MarkerExecutor {
            marker: "x",
            rows_with_marker: 0,
            rows_without: 0,
        };
        let model = FixedModel("```cypher\nMATCH (n) DETACH DELETE n\n```");
        let engine =
            GenerationEngine::new(&executor, PipelineConfig::default()).with_model(&model);
        let answer = engine.answer("whatever", GenerationMode::ModelOnly);
        assert_eq!(answer.status, AnswerStatus::Unsafe);
        assert!(answer.query.is_none());
    }

    #[test]
    fn rescue_recovers_from_primary_execution_error() {
        // The model query crashes at execution; the rules query runs and
        // returns rows — the rescue must replace the failed primary instead
        // of surfacing the error.
        let executor = FailOnMarkerExecutor {
            marker: "only-one",
            rows_without: 4,
        };
        let model = FixedModel(MODEL_QUERY);
        let engine =
            GenerationEngine::new(&executor, PipelineConfig::default()).with_model(&model);
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::Auto);
        assert_eq!(answer.status, AnswerStatus::Ok);
        assert_eq!(answer.row_count(), 4);
        assert!(answer.error.is_none());
        assert!(answer.fallback_used);
        assert_eq!(
            answer.query.unwrap().generator,
            Generator::Rescue(Box::new(Generator::Model))
        );
    }

    #[test]
    fn empty_rescue_still_replaces_a_failed_primary() {
        // Even zero rules rows beat a primary that crashed.
        let executor = FailOnMarkerExecutor {
            marker: "only-one",
            rows_without: 0,
        };
        let model = FixedModel(MODEL_QUERY);
        let engine =
            GenerationEngine::new(&executor, PipelineConfig::default()).with_model(&model);
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::Auto);
        assert_eq!(answer.status, AnswerStatus::Ok);
        assert_eq!(answer.row_count(), 0);
        assert!(matches!(
            answer.query.unwrap().generator,
            Generator::Rescue(_)
        ));
    }

    #[test]
    fn execution_error_surfaces_when_rescue_also_fails() {
        let model = FixedModel(MODEL_QUERY);
        let engine =
            GenerationEngine::new(&FailingExecutor, PipelineConfig::default()).with_model(&model);
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::Auto);
        assert_eq!(answer.status, AnswerStatus::ExecutionError);
        assert!(answer.error.unwrap().contains("boom"));
    }

    #[test]
    fn execution_error_is_reported_distinctly() {
        let engine = GenerationEngine::new(&FailingExecutor, PipelineConfig::default());
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::RulesOnly);
        assert_eq!(answer.status, AnswerStatus::ExecutionError);
        assert!(answer.error.unwrap().contains("boom"));
    }

    #[test]
    fn threshold_is_configurable() {
        // With a threshold of 3, a 3-row primary triggers rescue.
        let executor = MarkerExecutor {
            marker: "only-one",
            rows_with_marker: 3,
            rows_without: 10,
        };
        let model = FixedModel(MODEL_QUERY);
        let config = PipelineConfig {
            rescue_row_threshold: 3,
        };
        let engine = GenerationEngine::new(&executor, config).with_model(&model);
        let answer = engine.answer("¿Qué documentos mencionan RGPD?", GenerationMode::Auto);
        assert_eq!(answer.row_count(), 10);
        assert!(matches!(
            answer.query.unwrap().generator,
            Generator::Rescue(_)
        ));
    }
}
