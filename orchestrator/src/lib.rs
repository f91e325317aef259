//! Orchestration core for the funkhaus composition gateway
//!
//! Turns one client request into an ordered sequence of calls against the
//! progression, voicing and rendering services, while telemetry about the
//! request is submitted in the background without delaying the response.

pub mod endpoints;
pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod payloads;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use endpoints::{Endpoint, EndpointRegistry};
pub use error::{OrchestratorError, OrchestratorResult};
pub use ledger::TaskLedger;
pub use orchestrator::{Caller, Orchestrator, Outcome};
pub use services::{HealthProber, HealthReport, RealTransport, ServiceHealth};
pub use traits::{MockTransport, Transport};
