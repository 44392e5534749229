//! Error taxonomy for the pipeline and the evaluation harness.
//!
//! Generation failures and safety rejections never escape the orchestrator;
//! they are converted into "no query produced" at the smallest scope. The
//! boundaries that do propagate (graph execution, model calls, dataset IO)
//! each expose their own enum.

mod eval_error;
mod execution_error;
mod generation_error;

pub use eval_error::EvalError;
pub use execution_error::ExecutionError;
pub use generation_error::GenerationError;
