//! # lexgraph-core
//!
//! Foundation crate for the lexgraph question-answering system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PipelineConfig;
pub use intent::Intent;
pub use models::{Answer, AnswerStatus, GeneratedQuery, Generator, Row};
