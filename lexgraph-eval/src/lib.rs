//! # lexgraph-eval
//!
//! Offline evaluation harness for the NL → Cypher pipeline. Batch-drives the
//! generation orchestrator over a labeled question set, extracts predicted
//! identifiers from the executed rows, scores them against ground truth, and
//! aggregates per-strategy summary statistics into JSONL and CSV reports.

pub mod dataset;
pub mod extract;
pub mod harness;
pub mod metrics;
pub mod neo4j;
pub mod report;

pub use dataset::QuestionRecord;
pub use harness::evaluate;
