//! Configuration structs, deserializable from TOML with full defaults.

mod eval_config;
mod model_config;
mod pipeline_config;

pub use eval_config::EvalConfig;
pub use model_config::ModelConfig;
pub use pipeline_config::PipelineConfig;

use serde::{Deserialize, Serialize};

/// Default values shared by the config structs.
pub mod defaults {
    /// Rescue triggers when the executed row count is at or below this.
    /// Heuristic, domain-tuned; kept configurable rather than hard-coded.
    pub const RESCUE_ROW_THRESHOLD: usize = 1;

    /// Default chat model for the model-backed generator.
    pub const MODEL_NAME: &str = "gpt-4o-mini";

    /// OpenAI-compatible chat-completions endpoint.
    pub const MODEL_BASE_URL: &str = "https://api.openai.com/v1";

    pub const MODEL_TEMPERATURE: f64 = 0.0;

    /// Where evaluation reports land.
    pub const EVAL_OUT_DIR: &str = "results";
}

/// Top-level configuration, one TOML file for the whole workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexConfig {
    pub pipeline: PipelineConfig,
    pub model: ModelConfig,
    pub eval: EvalConfig,
}

impl LexConfig {
    /// Parse a TOML document. Missing sections and fields take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
