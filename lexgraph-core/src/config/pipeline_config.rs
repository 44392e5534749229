use serde::{Deserialize, Serialize};

use super::defaults;

/// Generation-and-rescue pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Row count at or below which the post-execution rescue re-run fires
    /// (auto mode only). Default 1: empty and singleton results are treated
    /// as "too narrow".
    pub rescue_row_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rescue_row_threshold: defaults::RESCUE_ROW_THRESHOLD,
        }
    }
}
