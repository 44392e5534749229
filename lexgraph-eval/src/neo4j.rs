//! Neo4j HTTP-API executor.
//!
//! Talks to the transactional endpoint (`/db/<name>/tx/commit`) over plain
//! HTTP; implements the [`IGraphExecutor`] seam so the pipeline stays free
//! of any connection lifecycle.

use std::collections::BTreeMap;

use lexgraph_core::errors::ExecutionError;
use lexgraph_core::models::Row;
use lexgraph_core::traits::IGraphExecutor;

/// Environment variables the executor reads.
pub const URL_ENV: &str = "NEO4J_URL";
pub const DATABASE_ENV: &str = "NEO4J_DATABASE";
pub const USER_ENV: &str = "NEO4J_USER";
pub const PASSWORD_ENV: &str = "NEO4J_PASSWORD";

pub struct Neo4jHttpExecutor {
    http: reqwest::blocking::Client,
    endpoint: String,
    user: Option<String>,
    password: String,
}

impl Neo4jHttpExecutor {
    pub fn new(base_url: &str, database: &str, user: Option<String>, password: String) -> Self {
        let endpoint = format!(
            "{}/db/{database}/tx/commit",
            base_url.trim_end_matches('/')
        );
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint,
            user,
            password,
        }
    }

    /// Build from `NEO4J_URL` / `NEO4J_DATABASE` / `NEO4J_USER` /
    /// `NEO4J_PASSWORD`, with localhost defaults.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(URL_ENV).unwrap_or_else(|_| "http://localhost:7474".to_string());
        let database = std::env::var(DATABASE_ENV).unwrap_or_else(|_| "neo4j".to_string());
        let user = std::env::var(USER_ENV).ok().filter(|u| !u.is_empty());
        let password = std::env::var(PASSWORD_ENV).unwrap_or_default();
        Self::new(&base_url, &database, user, password)
    }

    fn parse_rows(payload: &serde_json::Value) -> Result<Vec<Row>, ExecutionError> {
        if let Some(errors) = payload["errors"].as_array() {
            if let Some(first) = errors.first() {
                return Err(ExecutionError::QueryFailed {
                    reason: first["message"]
                        .as_str()
                        .unwrap_or("unknown server error")
                        .to_string(),
                });
            }
        }

        let result = &payload["results"][0];
        let columns: Vec<String> = result["columns"]
            .as_array()
            .ok_or_else(|| ExecutionError::MalformedResponse {
                reason: "response carried no columns".to_string(),
            })?
            .iter()
            .filter_map(|c| c.as_str())
            .map(str::to_string)
            .collect();

        let data = result["data"].as_array().cloned().unwrap_or_default();
        let mut rows = Vec::with_capacity(data.len());
        for entry in data {
            let values = entry["row"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            let row: Row = columns
                .iter()
                .cloned()
                .zip(values)
                .collect::<BTreeMap<_, _>>();
            rows.push(row);
        }
        Ok(rows)
    }
}

impl IGraphExecutor for Neo4jHttpExecutor {
    fn run(&self, query: &str) -> Result<Vec<Row>, ExecutionError> {
        let body = serde_json::json!({
            "statements": [{ "statement": query }]
        });

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(user) = &self.user {
            request = request.basic_auth(user, Some(&self.password));
        }

        let response = request.send().map_err(|e| ExecutionError::Unreachable {
            reason: e.to_string(),
        })?;
        if !response.status().is_success() {
            return Err(ExecutionError::QueryFailed {
                reason: format!("status {}", response.status()),
            });
        }

        let payload: serde_json::Value =
            response
                .json()
                .map_err(|e| ExecutionError::MalformedResponse {
                    reason: e.to_string(),
                })?;
        Self::parse_rows(&payload)
    }
}
