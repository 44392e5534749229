/// Model-call errors raised by an [`crate::traits::IModelClient`].
///
/// A failed generation is not an error at the pipeline level: the
/// orchestrator converts it into "no query produced" and escalates.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("model client unavailable")]
    ModelUnavailable,

    #[error("model call failed: {reason}")]
    ModelCallFailed { reason: String },
}
