//! Background task ledger for fire-and-forget telemetry
//!
//! `submit` starts one transport call per fact right away and keeps its
//! handle. `join` consumes the ledger, so each handle is awaited exactly once.
//! Dropping a ledger without joining abandons whatever is still in flight.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

use shared::{flow_debug, flow_warn, TelemetryFact, Workflow};

use crate::endpoints::EndpointRegistry;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::payloads::build_telemetry_request;
use crate::traits::Transport;

struct Submission {
    kind: &'static str,
    handle: JoinHandle<OrchestratorResult<String>>,
}

pub struct TaskLedger<T: Transport + 'static> {
    transport: Arc<T>,
    endpoints: Arc<EndpointRegistry>,
    flow: Workflow,
    submissions: Vec<Submission>,
}

impl<T: Transport + 'static> TaskLedger<T> {
    pub fn new(transport: Arc<T>, endpoints: Arc<EndpointRegistry>, flow: Workflow) -> Self {
        Self {
            transport,
            endpoints,
            flow,
            submissions: Vec::new(),
        }
    }

    /// Start one background call per fact without waiting on any of them
    pub fn submit(&mut self, facts: impl IntoIterator<Item = TelemetryFact>) -> OrchestratorResult<()> {
        for fact in facts {
            let kind = fact.kind();
            let (endpoint, fact) = build_telemetry_request(&self.endpoints, fact);
            let payload = serde_json::to_value(&fact)?;
            let transport = Arc::clone(&self.transport);

            let handle = tokio::spawn(
                async move { transport.post_json(&endpoint, payload).await }.in_current_span(),
            );
            flow_debug!(self.flow, kind, "Submitted telemetry");
            self.submissions.push(Submission { kind, handle });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }

    /// Await every submission; the first failure is returned, later ones are
    /// only logged. Returns the number of successful submissions.
    pub async fn join(self) -> OrchestratorResult<usize> {
        let mut first_failure: Option<OrchestratorError> = None;
        let mut succeeded = 0;

        for Submission { kind, handle } in self.submissions {
            let outcome = match handle.await {
                Ok(result) => result.map(|_| ()),
                Err(e) => Err(OrchestratorError::TaskJoin(e)),
            };

            match outcome {
                Ok(()) => succeeded += 1,
                Err(e) if first_failure.is_none() => {
                    flow_warn!(self.flow, kind, "Telemetry submission failed: {e}");
                    first_failure = Some(e);
                }
                Err(e) => {
                    flow_warn!(self.flow, kind, "Further telemetry submission failed: {e}");
                }
            }
        }

        match first_failure {
            Some(e) => Err(e),
            None => Ok(succeeded),
        }
    }
}
