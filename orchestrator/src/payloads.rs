//! Payload builder: one (endpoint, payload) pair per backend call
//!
//! Every function here is pure. Endpoints come from the registry and are
//! tagged on a copy when a route suffix is needed.

use shared::adapters::{construct_cheet_sheet, construct_progression};
use shared::{
    CheetSheet, PerformanceObject, PerformanceResponse, Progression, ProgressionRequest,
    PseudoMIDI, TelemetryFact,
};

use crate::endpoints::{Endpoint, EndpointRegistry};
use crate::error::OrchestratorResult;

/// Route suffix asking the renderer for a standard MIDI file
pub const RENDER_FORMAT: &str = "mid";

pub fn build_progression_request(
    endpoints: &EndpointRegistry,
    performance: &PerformanceObject,
) -> (Endpoint, ProgressionRequest) {
    let request = ProgressionRequest {
        graph: performance.graph(),
    };
    (endpoints.generate.clone(), request)
}

pub fn build_amend_request(
    endpoints: &EndpointRegistry,
    performance: &PerformanceResponse,
    index: usize,
) -> OrchestratorResult<(Endpoint, Progression)> {
    let progression = construct_progression(performance)?;
    Ok((endpoints.amend.with_option(index.to_string()), progression))
}

pub fn build_voicing_request(
    endpoints: &EndpointRegistry,
    performance: &PerformanceObject,
    progression: Option<&Progression>,
) -> OrchestratorResult<(Endpoint, CheetSheet)> {
    let cheet_sheet = construct_cheet_sheet(performance, progression)?;
    Ok((endpoints.perform.clone(), cheet_sheet))
}

pub fn build_render_request(
    endpoints: &EndpointRegistry,
    pseudo_midi: PseudoMIDI,
) -> (Endpoint, PseudoMIDI) {
    (endpoints.savemidi.with_option(RENDER_FORMAT), pseudo_midi)
}

pub fn build_telemetry_request(
    endpoints: &EndpointRegistry,
    fact: TelemetryFact,
) -> (Endpoint, TelemetryFact) {
    let endpoint = match &fact {
        TelemetryFact::Session(_) | TelemetryFact::User(_) => &endpoints.people,
        TelemetryFact::Label(_) => &endpoints.data,
    };
    (endpoint.clone(), fact)
}
