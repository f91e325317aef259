//! Gateway-specific error types and their HTTP mapping

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use orchestrator::OrchestratorError;
use shared::{flow_error, flow_warn, Workflow};

/// Detail sent to clients when a dependency probe fails
pub const UNHEALTHY_DETAIL: &str = "Not all remotes are healthy.";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Orchestration(#[from] OrchestratorError),

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn config(message: impl Into<String>) -> Self {
        GatewayError::Config(message.into())
    }

    /// Status code the client sees for this failure
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Orchestration(e) => match e {
                // Only upstream client and server errors are forwarded as is
                OrchestratorError::Upstream { status, .. } => StatusCode::from_u16(*status)
                    .ok()
                    .filter(|code| code.is_client_error() || code.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                OrchestratorError::Connection { .. } | OrchestratorError::InvalidResponse { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                OrchestratorError::Model(_) => StatusCode::UNPROCESSABLE_ENTITY,
                OrchestratorError::Unhealthy { .. } => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            GatewayError::InvalidRequest { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Config(_) | GatewayError::ServerStartup(_) | GatewayError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the `detail` field of the error body
    pub fn detail(&self) -> String {
        match self {
            GatewayError::Orchestration(OrchestratorError::Upstream { message, .. }) => message.clone(),
            GatewayError::Orchestration(OrchestratorError::Unhealthy { .. }) => UNHEALTHY_DETAIL.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for GatewayError {
    fn from(rejection: JsonRejection) -> Self {
        GatewayError::InvalidRequest {
            details: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for GatewayError {
    fn from(rejection: PathRejection) -> Self {
        GatewayError::InvalidRequest {
            details: rejection.body_text(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            flow_error!(Workflow::Gateway, status = status.as_u16(), "Request failed: {self}");
        } else {
            flow_warn!(Workflow::Gateway, status = status.as_u16(), "Request rejected: {self}");
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
