//! Orchestrator-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Upstream {endpoint} responded {status}: {message}")]
    Upstream {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Could not reach {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    #[error("Unexpected response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("Endpoint not configured: {name}")]
    MissingEndpoint { name: String },

    #[error("Invalid endpoint {name}: {reason}")]
    InvalidEndpoint { name: String, reason: String },

    #[error("Not all remotes are healthy: {}", .unhealthy.join(", "))]
    Unhealthy { unhealthy: Vec<String> },

    #[error("Model error: {0}")]
    Model(#[from] SharedError),

    #[error("Background task did not complete: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
