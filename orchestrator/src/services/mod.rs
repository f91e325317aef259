//! Service implementations
//!
//! Real implementations of the service traits plus the health prober built
//! on top of them.

pub mod health;
pub mod http_transport;

#[cfg(test)]
mod tests;

pub use health::{HealthProber, HealthReport, ServiceHealth};
pub use http_transport::RealTransport;
