//! # lexgraph-nl2cypher
//!
//! Translates natural-language questions about a legal-document knowledge
//! graph into read-only Cypher, and escalates between generation strategies
//! when the first attempt returns poor results.
//!
//! Pipeline: question → [`canonical`] → [`intent`] → [`templates`] →
//! [`rewrite`] → [`safety`] → execute → [`engine`] accept/escalate decision.

pub mod canonical;
pub mod engine;
pub mod intent;
pub mod model;
#[cfg(feature = "openai")]
pub mod openai;
pub mod rewrite;
pub mod safety;
pub mod templates;

pub use engine::{GenerationEngine, GenerationMode};
