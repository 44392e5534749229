//! Collaborator seams. The core never owns a connection lifecycle; callers
//! inject these capabilities.

mod graph;
mod model;

pub use graph::IGraphExecutor;
pub use model::IModelClient;
