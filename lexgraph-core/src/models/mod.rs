//! Transient, in-memory data model: queries, answers, evaluation records.

mod answer;
mod eval_record;
mod query;

pub use answer::{Answer, AnswerStatus, Row};
pub use eval_record::{EvalRecord, EvalSummary};
pub use query::{GeneratedQuery, Generator};
