use serde::{Deserialize, Serialize};

use super::defaults;

/// Model-backed generator configuration.
///
/// The API key is never stored here; clients read it from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Chat model identifier.
    pub name: String,
    /// OpenAI-compatible base URL.
    pub base_url: String,
    /// Sampling temperature. Query generation wants determinism.
    pub temperature: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: defaults::MODEL_NAME.to_string(),
            base_url: defaults::MODEL_BASE_URL.to_string(),
            temperature: defaults::MODEL_TEMPERATURE,
        }
    }
}
