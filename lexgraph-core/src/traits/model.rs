use crate::errors::GenerationError;

/// One request/response call to a natural-language model collaborator.
///
/// `system` carries the schema description and output contract; `user` is the
/// raw question. The response is scraped by the caller — implementors return
/// the model text verbatim.
pub trait IModelClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError>;

    /// Model identifier for record keeping.
    fn model_name(&self) -> &str;
}
