/// Graph-execution errors raised by an [`crate::traits::IGraphExecutor`].
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("graph endpoint unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("malformed response from graph endpoint: {reason}")]
    MalformedResponse { reason: String },
}
