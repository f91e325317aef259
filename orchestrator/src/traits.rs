//! Trait definitions with mockall annotations for testing
//!
//! The orchestrator reaches its backend services only through these seams,
//! so every workflow can be exercised against mocks.

use crate::endpoints::Endpoint;
use crate::error::OrchestratorResult;

/// One request/response exchange against a named backend endpoint
///
/// Implementations own connection reuse and timeout policy; callers impose
/// neither.
#[mockall::automock]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON payload and return the raw response body
    ///
    /// # Returns
    /// The body text on a 2xx response, `Upstream` carrying the downstream
    /// status and message otherwise, or `Connection` if nothing came back
    async fn post_json(&self, endpoint: &Endpoint, payload: serde_json::Value) -> OrchestratorResult<String>;

    /// GET the endpoint and report whether it answered with a success status
    async fn ping(&self, endpoint: &Endpoint) -> OrchestratorResult<bool>;
}
