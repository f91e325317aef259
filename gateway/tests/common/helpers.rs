//! Test helpers for driving the gateway router
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use gateway::Gateway;
use orchestrator::endpoints::names;
use orchestrator::{Endpoint, MockTransport, OrchestratorError, OrchestratorResult};

use super::fixtures::TestFixtures;

/// Every POST seen by a mock backend: rendered URL and payload
pub type Calls = Arc<Mutex<Vec<(String, Value)>>>;

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Mock backend that records each POST and answers through `route`
    pub fn backend<F>(calls: &Calls, route: F) -> MockTransport
    where
        F: Fn(&Endpoint) -> OrchestratorResult<String> + Send + 'static,
    {
        let calls = Arc::clone(calls);
        let mut transport = MockTransport::new();
        transport.expect_post_json().returning(move |endpoint, payload| {
            calls.lock().unwrap().push((endpoint.url(), payload));
            route(endpoint)
        });
        transport
    }

    pub fn gateway(transport: MockTransport) -> Gateway<MockTransport> {
        Gateway::new(transport, TestFixtures::registry(), "funkhaus-test")
    }

    pub fn upstream(endpoint: &Endpoint, status: u16, message: &str) -> OrchestratorError {
        OrchestratorError::Upstream {
            endpoint: endpoint.name.clone(),
            status,
            message: message.to_string(),
        }
    }

    pub fn url_of(name: &str) -> String {
        format!("http://{}:{}/{}", TestFixtures::BACKEND_HOST, TestFixtures::BACKEND_PORT, name)
    }

    /// URLs of the critical-path calls, in the order they were made
    pub fn critical_path(calls: &Calls) -> Vec<String> {
        let telemetry = [Self::url_of(names::PEOPLE), Self::url_of(names::DATA)];
        calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .filter(|url| !telemetry.contains(url))
            .collect()
    }

    /// Payloads posted to one URL
    pub fn payloads_to(calls: &Calls, url: &str) -> Vec<Value> {
        calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(seen, _)| seen == url)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    /// Send one request through the router; an empty body reads as `null`
    pub async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    /// Assert the parallel lists of a served performance line up
    pub fn assert_consistent(body: &Value) {
        let nodes = body["nodes"].as_array().unwrap().len();
        assert_eq!(body["structures"].as_array().unwrap().len(), nodes);
        assert_eq!(body["changeabilities"].as_array().unwrap().len(), nodes);
        assert_eq!(body["human_readable"].as_array().unwrap().len(), nodes);
    }
}
