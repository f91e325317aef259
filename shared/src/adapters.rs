//! Conversions between the client-facing and backend-facing models

use crate::errors::{SharedError, SharedResult};
use crate::types::{
    CheetSheet, PathData, PerformanceData, PerformanceObject, PerformanceResponse,
    PerformanceResponseBuilder, Progression, PseudoMIDI,
};

pub fn construct_path_data(progression: &Progression) -> SharedResult<PathData> {
    Ok(PathData {
        graph_name: progression.graph(),
        nodes: progression.path_nodes()?,
    })
}

pub fn construct_voicing_data(
    progression: &Progression,
    cheet_sheet: &CheetSheet,
    pseudo_midi: &PseudoMIDI,
) -> SharedResult<PerformanceData> {
    Ok(PerformanceData {
        perf_id: pseudo_midi.ticket.clone(),
        key: cheet_sheet.key(),
        path_nodes: progression.path_nodes()?,
    })
}

/// Rebuild the canonical progression carried by a previous response
pub fn construct_progression(performance: &PerformanceResponse) -> SharedResult<Progression> {
    Progression::new(
        performance.graph(),
        performance.nodes().to_vec(),
        performance
            .structures()
            .iter()
            .map(|symbol| symbol.intervals())
            .collect(),
        performance.changeabilities().to_vec(),
    )
}

/// Voicing request in the performance's key.
///
/// An explicit progression wins; otherwise the nodes and structures of a full
/// response are used. A bare request with no progression has nothing to voice.
pub fn construct_cheet_sheet(
    performance: &PerformanceObject,
    progression: Option<&Progression>,
) -> SharedResult<CheetSheet> {
    let (info, structures, bases) = match (progression, performance.as_response()) {
        (Some(progression), _) => (
            progression.path_nodes()?,
            progression.structures().to_vec(),
            progression.bases(),
        ),
        (None, Some(response)) => (
            response
                .nodes()
                .iter()
                .map(|node| node.node_id)
                .zip(response.structures().iter().copied())
                .collect(),
            response
                .structures()
                .iter()
                .map(|symbol| symbol.intervals())
                .collect(),
            response.nodes().iter().map(|node| node.base).collect(),
        ),
        (None, None) => return Err(SharedError::insufficient("CheetSheet")),
    };

    if info.is_empty() {
        return Err(SharedError::insufficient("CheetSheet"));
    }
    CheetSheet::new(info, structures, bases, performance.key())
}

pub fn construct_performance(
    progression: &Progression,
    cheet_sheet: &CheetSheet,
    pseudo_midi: &PseudoMIDI,
    hex_blob: String,
) -> SharedResult<PerformanceResponse> {
    PerformanceResponseBuilder {
        key: cheet_sheet.key(),
        graph: progression.graph(),
        ticket: pseudo_midi.ticket.clone(),
        hex_blob,
        structures: progression.symbols()?,
        changeabilities: progression.changeabilities().to_vec(),
        nodes: progression.nodes().to_vec(),
    }
    .build()
}
