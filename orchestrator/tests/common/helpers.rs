//! Test helpers and builder patterns for orchestrator tests
//!
//! Reduces the boilerplate of wiring a `MockTransport` into an orchestrator.
use orchestrator::{endpoints, Endpoint, EndpointRegistry, MockTransport, Orchestrator, OrchestratorError};

use super::fixtures::TestFixtures;

/// Builder pattern for creating test orchestrators over a mock transport
pub struct OrchestratorBuilder {
    transport: MockTransport,
    endpoints: EndpointRegistry,
}

impl OrchestratorBuilder {
    /// Create a new builder with the fixture registry and no expectations
    pub fn new() -> Self {
        Self {
            transport: MockTransport::new(),
            endpoints: TestFixtures::registry(),
        }
    }

    /// Configure the transport mock with a setup function
    pub fn with_transport<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockTransport),
    {
        setup(&mut self.transport);
        self
    }

    /// Accept any number of telemetry submissions
    pub fn with_telemetry_ok(self) -> Self {
        self.with_transport(|transport| {
            transport
                .expect_post_json()
                .withf(|endpoint, _| TestHelpers::is_telemetry(endpoint))
                .times(0..)
                .returning(|_, _| Ok("{}".to_string()));
        })
    }

    /// Build the orchestrator with the configured mock
    pub fn build(self) -> TestOrchestrator {
        Orchestrator::new(self.transport, self.endpoints)
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for test orchestrator with a mock transport
pub type TestOrchestrator = Orchestrator<MockTransport>;

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    pub fn is_telemetry(endpoint: &Endpoint) -> bool {
        endpoint.name == endpoints::names::PEOPLE || endpoint.name == endpoints::names::DATA
    }

    pub fn upstream(endpoint: &Endpoint, status: u16, message: &str) -> OrchestratorError {
        OrchestratorError::Upstream {
            endpoint: endpoint.name.clone(),
            status,
            message: message.to_string(),
        }
    }

    /// Assert the parallel lists of a served performance line up
    pub fn assert_consistent(response: &shared::PerformanceResponse) {
        assert_eq!(response.structures().len(), response.nodes().len());
        assert_eq!(response.changeabilities().len(), response.nodes().len());
        assert_eq!(response.human_readable().len(), response.nodes().len());
    }
}
