//! Main orchestrator implementation
//!
//! Each workflow is a short sequential protocol: telemetry is submitted to a
//! per-request ledger first, the critical path (progression, voicing, render)
//! runs strictly in order, and the ledger is joined before the workflow
//! returns, whether the critical path succeeded or not.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::net::Ipv4Addr;
use std::sync::Arc;

use shared::adapters::{
    construct_path_data, construct_performance, construct_progression, construct_voicing_data,
};
use shared::{
    flow_debug, flow_info, flow_warn, PerformanceFlag, PerformanceObject, PerformanceResponse,
    Progression, PseudoMIDI, TelemetryFact, Ticket, User, Workflow,
};

use crate::endpoints::{Endpoint, EndpointRegistry};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::ledger::TaskLedger;
use crate::payloads::{
    build_amend_request, build_progression_request, build_render_request, build_voicing_request,
};
use crate::services::{HealthProber, HealthReport};
use crate::traits::Transport;

/// Who is calling: the session address and, for registered users, their identity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub sess_id: Ipv4Addr,
    pub user: Option<User>,
}

impl Caller {
    pub fn anonymous(sess_id: Ipv4Addr) -> Self {
        Self { sess_id, user: None }
    }

    fn telemetry(&self) -> TelemetryFact {
        TelemetryFact::for_caller(self.sess_id, self.user.as_ref())
    }
}

/// A workflow result plus any telemetry failure observed while it was built.
/// A telemetry failure never replaces the value.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub telemetry_error: Option<OrchestratorError>,
}

impl<T> Outcome<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Drives the generate, amend and label workflows over an injected transport
pub struct Orchestrator<T: Transport + 'static> {
    transport: Arc<T>,
    endpoints: Arc<EndpointRegistry>,
}

impl<T: Transport + 'static> Clone for Orchestrator<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            endpoints: Arc::clone(&self.endpoints),
        }
    }
}

impl<T: Transport + 'static> Orchestrator<T> {
    /// Create new orchestrator with injected transport
    pub fn new(transport: T, endpoints: EndpointRegistry) -> Self {
        Self {
            transport: Arc::new(transport),
            endpoints: Arc::new(endpoints),
        }
    }

    pub fn health_prober(&self) -> HealthProber<T> {
        HealthProber::new(Arc::clone(&self.transport), self.endpoints.healthpoints())
    }

    /// Probe every backend service; fails with `Unhealthy` unless all answer
    pub async fn healthcheck(&self) -> OrchestratorResult<HealthReport> {
        self.health_prober().probe().await.into_result()
    }

    /// Generate a performance, reusing the progression of a full previous
    /// response or requesting a fresh one for a bare request
    pub async fn generate(
        &self,
        caller: &Caller,
        performance: &PerformanceObject,
    ) -> OrchestratorResult<Outcome<PerformanceResponse>> {
        let flow = Workflow::Generate;
        let mut ledger = self.ledger(flow);
        let fact = caller.telemetry();
        let data_type = fact.kind();
        ledger.submit([fact])?;
        flow_info!(flow, "Submitted the {data_type} data from request");

        let result: OrchestratorResult<PerformanceResponse> = async {
            let progression = match performance.as_response() {
                Some(previous) => {
                    let progression = construct_progression(previous)?;
                    flow_info!(flow, "Parsed a progression from {}", performance.kind());
                    progression
                }
                None => {
                    flow_info!(
                        flow,
                        "Can't parse a progression from {}: requesting a new one",
                        performance.kind()
                    );
                    let (endpoint, request) = build_progression_request(&self.endpoints, performance);
                    self.exchange(flow, &endpoint, &request).await?
                }
            };
            self.perform(flow, performance, &progression).await
        }
        .await;

        // Telemetry is awaited on the failure path too
        let telemetry_error = self.settle(flow, ledger).await;
        result.map(|value| Outcome { value, telemetry_error })
    }

    /// Replace the chord at `index` of a previous performance.
    /// Index bounds and changeability are enforced by the progression service.
    pub async fn amend(
        &self,
        caller: &Caller,
        previous: PerformanceResponse,
        index: usize,
    ) -> OrchestratorResult<Outcome<PerformanceResponse>> {
        let flow = Workflow::Amend;
        let mut ledger = self.ledger(flow);
        ledger.submit([caller.telemetry()])?;

        let result: OrchestratorResult<PerformanceResponse> = async {
            let (endpoint, progression) = build_amend_request(&self.endpoints, &previous, index)?;
            flow_info!(flow, index, "Requesting an amended progression");
            let amended: Progression = self.exchange(flow, &endpoint, &progression).await?;

            let performance = PerformanceObject::from(previous);
            self.perform(flow, &performance, &amended).await
        }
        .await;

        let telemetry_error = self.settle(flow, ledger).await;
        result.map(|value| Outcome { value, telemetry_error })
    }

    /// Record the caller and a label for a performance; succeeds only if both
    /// submissions do
    pub async fn label(
        &self,
        caller: &Caller,
        ticket: Ticket,
        flag: PerformanceFlag,
    ) -> OrchestratorResult<()> {
        let flow = Workflow::Label;
        let mut ledger = self.ledger(flow);
        ledger.submit([
            caller.telemetry(),
            TelemetryFact::label(caller.sess_id, ticket, flag, caller.user.as_ref()),
        ])?;

        let stored = ledger.join().await?;
        flow_info!(flow, stored, "Stored labels");
        Ok(())
    }

    fn ledger(&self, flow: Workflow) -> TaskLedger<T> {
        TaskLedger::new(Arc::clone(&self.transport), Arc::clone(&self.endpoints), flow)
    }

    /// Voice and render a resolved progression, then assemble the response
    async fn perform(
        &self,
        flow: Workflow,
        performance: &PerformanceObject,
        progression: &Progression,
    ) -> OrchestratorResult<PerformanceResponse> {
        let path = construct_path_data(progression)?;
        flow_debug!(flow, graph = %path.graph_name, chords = path.nodes.len(), "Resolved progression");

        let (endpoint, cheet_sheet) = build_voicing_request(&self.endpoints, performance, Some(progression))?;
        if cheet_sheet.key_randomized() {
            flow_info!(flow, key = %cheet_sheet.key(), "No key supplied, picked one at random");
        }
        let pseudo_midi: PseudoMIDI = self.exchange(flow, &endpoint, &cheet_sheet).await?;

        let voicing = construct_voicing_data(progression, &cheet_sheet, &pseudo_midi)?;
        flow_info!(
            flow,
            perf_id = %voicing.perf_id,
            key = %voicing.key,
            chords = voicing.path_nodes.len(),
            "Voiced a performance"
        );

        let (endpoint, pseudo_midi) = build_render_request(&self.endpoints, pseudo_midi);
        let hex_blob: String = self.exchange(flow, &endpoint, &pseudo_midi).await?;
        flow_info!(flow, "Requested a new hex-encoded midi");

        let response = construct_performance(progression, &cheet_sheet, &pseudo_midi, hex_blob)?;
        flow_info!(flow, ticket = %response.ticket(), "Constructed a new performance");
        Ok(response)
    }

    /// Join the ledger once the critical path is done; failures are logged and
    /// handed back alongside the value
    async fn settle(&self, flow: Workflow, ledger: TaskLedger<T>) -> Option<OrchestratorError> {
        match ledger.join().await {
            Ok(count) => {
                flow_info!(flow, count, "Received all responses from the server");
                None
            }
            Err(e) => {
                flow_warn!(flow, "Telemetry failed after the response was built: {e}");
                Some(e)
            }
        }
    }

    /// POST a payload on the critical path and parse the reply
    async fn exchange<P, R>(&self, flow: Workflow, endpoint: &Endpoint, payload: &P) -> OrchestratorResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(payload)?;
        flow_debug!(flow, endpoint = %endpoint.name, "POST {}", endpoint.url());

        let raw = match self.transport.post_json(endpoint, body).await {
            Ok(raw) => raw,
            Err(e) => {
                flow_warn!(flow, endpoint = %endpoint.name, "Request failed: {e}");
                return Err(e);
            }
        };

        serde_json::from_str(&raw).map_err(|e| OrchestratorError::InvalidResponse {
            endpoint: endpoint.name.clone(),
            message: e.to_string(),
        })
    }
}
