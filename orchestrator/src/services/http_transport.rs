//! reqwest-backed transport

use async_trait::async_trait;

use crate::endpoints::Endpoint;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::Transport;

/// Transport over a shared `reqwest::Client` connection pool
#[derive(Clone, Debug, Default)]
pub struct RealTransport {
    client: reqwest::Client,
}

impl RealTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Prefer a `detail` field from a JSON error body, then the raw body,
/// then the status reason
fn failure_message(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned())
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        });

    match detail {
        Some(detail) => detail,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status.canonical_reason().unwrap_or("Unknown status").to_string(),
    }
}

#[async_trait]
impl Transport for RealTransport {
    async fn post_json(&self, endpoint: &Endpoint, payload: serde_json::Value) -> OrchestratorResult<String> {
        let response = self
            .client
            .post(endpoint.url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| OrchestratorError::Connection {
                endpoint: endpoint.name.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OrchestratorError::InvalidResponse {
                endpoint: endpoint.name.clone(),
                message: format!("Failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            return Err(OrchestratorError::Upstream {
                endpoint: endpoint.name.clone(),
                status: status.as_u16(),
                message: failure_message(status, &body),
            });
        }

        Ok(body)
    }

    async fn ping(&self, endpoint: &Endpoint) -> OrchestratorResult<bool> {
        let response = self
            .client
            .get(endpoint.url())
            .send()
            .await
            .map_err(|e| OrchestratorError::Connection {
                endpoint: endpoint.name.clone(),
                message: e.to_string(),
            })?;

        Ok(response.status().is_success())
    }
}
