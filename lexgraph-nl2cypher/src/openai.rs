//! OpenAI-compatible chat-completions client (feature `openai`).
//!
//! Plain HTTP via reqwest's blocking client; the pipeline itself only sees
//! the [`IModelClient`] trait.

use lexgraph_core::config::ModelConfig;
use lexgraph_core::errors::GenerationError;
use lexgraph_core::traits::IModelClient;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    config: ModelConfig,
    api_key: String,
}

impl OpenAiClient {
    /// Build a client with the key from `OPENAI_API_KEY`.
    /// Returns `ModelUnavailable` when the key is missing or empty.
    pub fn from_env(config: ModelConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(GenerationError::ModelUnavailable)?;
        Ok(Self {
            http: reqwest::blocking::Client::new(),
            config,
            api_key,
        })
    }
}

impl IModelClient for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let body = serde_json::json!({
            "model": self.config.name,
            "temperature": self.config.temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| GenerationError::ModelCallFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(GenerationError::ModelCallFailed {
                reason: format!("status {}", response.status()),
            });
        }

        let payload: serde_json::Value =
            response
                .json()
                .map_err(|e| GenerationError::ModelCallFailed {
                    reason: e.to_string(),
                })?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| GenerationError::ModelCallFailed {
                reason: "response carried no message content".to_string(),
            })
    }

    fn model_name(&self) -> &str {
        &self.config.name
    }
}
