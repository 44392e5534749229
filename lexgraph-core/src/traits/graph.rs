use crate::errors::ExecutionError;
use crate::models::Row;

/// "Submit query text, receive tabular rows."
///
/// The only capability the core needs from the graph store. Connection
/// pooling, timeouts, and retries belong to the implementor.
pub trait IGraphExecutor {
    fn run(&self, query: &str) -> Result<Vec<Row>, ExecutionError>;
}
