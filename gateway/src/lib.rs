//! HTTP gateway for the funkhaus composition workflows
//!
//! Exposes `generate`, `amend/{index}`, `label` and `healthcheck` over axum
//! and delegates every request to the orchestrator.

pub mod config;
pub mod error;
pub mod gateway_impl;
pub mod handlers;
pub mod models;

// Re-export commonly used types
pub use config::{Args, FileConfig, GatewayConfig};
pub use error::{GatewayError, GatewayResult};
pub use gateway_impl::Gateway;
pub use models::{AmendmentRequest, Identified, LabelingRequest, PerformanceRequest};
