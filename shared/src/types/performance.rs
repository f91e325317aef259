//! Client-facing performance objects

use serde::{Deserialize, Serialize};

use super::musical::{ChordType, GraphName, Node};
use super::note::Note;
use crate::codec::ChordStructureSymbol;
use crate::errors::{SharedError, SharedResult};

/// Bare generation request: an optional key and graph, nothing else
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Performance {
    #[serde(default)]
    pub key: Option<Note>,
    #[serde(default)]
    pub graph: Option<GraphName>,
}

/// Human-readable chord: note name, chord type, optional seventh/ninth
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordLabel(pub String, pub ChordType, pub Option<u8>);

/// Project nodes and structures onto readable chord labels in `key`
pub fn human_readable(
    key: Note,
    nodes: &[Node],
    structures: &[ChordStructureSymbol],
) -> Vec<ChordLabel> {
    nodes
        .iter()
        .zip(structures)
        .map(|(node, symbol)| {
            ChordLabel(
                (node.base + key).name().to_string(),
                node.node_id.chord_type(),
                symbol.quality(),
            )
        })
        .collect()
}

#[derive(Deserialize)]
struct PerformanceResponseFields {
    key: Note,
    graph: GraphName,
    ticket: String,
    hex_blob: String,
    structures: Vec<ChordStructureSymbol>,
    changeabilities: Vec<bool>,
    #[serde(default)]
    human_readable: Vec<ChordLabel>,
    nodes: Vec<Node>,
}

/// The aggregate returned to clients after generate or amend.
///
/// The human-readable projection is derived once: an incoming non-empty
/// projection is kept as is, an empty one is computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PerformanceResponseFields")]
pub struct PerformanceResponse {
    key: Note,
    graph: GraphName,
    ticket: String,
    hex_blob: String,
    structures: Vec<ChordStructureSymbol>,
    changeabilities: Vec<bool>,
    human_readable: Vec<ChordLabel>,
    nodes: Vec<Node>,
}

impl TryFrom<PerformanceResponseFields> for PerformanceResponse {
    type Error = SharedError;

    fn try_from(fields: PerformanceResponseFields) -> Result<Self, Self::Error> {
        let mut response = PerformanceResponseBuilder {
            key: fields.key,
            graph: fields.graph,
            ticket: fields.ticket,
            hex_blob: fields.hex_blob,
            structures: fields.structures,
            changeabilities: fields.changeabilities,
            nodes: fields.nodes,
        }
        .build()?;

        if !fields.human_readable.is_empty() {
            if fields.human_readable.len() != response.nodes.len() {
                return Err(SharedError::length_mismatch(
                    "performance human_readable",
                    &[response.nodes.len(), fields.human_readable.len()],
                ));
            }
            response.human_readable = fields.human_readable;
        }
        Ok(response)
    }
}

/// Everything a response needs except the derived projection
#[derive(Clone, Debug)]
pub struct PerformanceResponseBuilder {
    pub key: Note,
    pub graph: GraphName,
    pub ticket: String,
    pub hex_blob: String,
    pub structures: Vec<ChordStructureSymbol>,
    pub changeabilities: Vec<bool>,
    pub nodes: Vec<Node>,
}

impl PerformanceResponseBuilder {
    pub fn build(self) -> SharedResult<PerformanceResponse> {
        let lengths = [self.nodes.len(), self.structures.len(), self.changeabilities.len()];
        if lengths.iter().any(|len| *len != self.nodes.len()) {
            return Err(SharedError::length_mismatch("performance", &lengths));
        }

        let human_readable = human_readable(self.key, &self.nodes, &self.structures);
        Ok(PerformanceResponse {
            key: self.key,
            graph: self.graph,
            ticket: self.ticket,
            hex_blob: self.hex_blob,
            structures: self.structures,
            changeabilities: self.changeabilities,
            human_readable,
            nodes: self.nodes,
        })
    }
}

impl PerformanceResponse {
    pub fn key(&self) -> Note {
        self.key
    }

    pub fn graph(&self) -> GraphName {
        self.graph
    }

    pub fn ticket(&self) -> &str {
        &self.ticket
    }

    pub fn hex_blob(&self) -> &str {
        &self.hex_blob
    }

    pub fn structures(&self) -> &[ChordStructureSymbol] {
        &self.structures
    }

    pub fn changeabilities(&self) -> &[bool] {
        &self.changeabilities
    }

    pub fn human_readable(&self) -> &[ChordLabel] {
        &self.human_readable
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Inbound performance: a full prior response (reuse) or a bare request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerformanceObject {
    Full(Box<PerformanceResponse>),
    Bare(Performance),
}

impl Default for PerformanceObject {
    fn default() -> Self {
        PerformanceObject::Bare(Performance::default())
    }
}

impl PerformanceObject {
    pub fn key(&self) -> Option<Note> {
        match self {
            PerformanceObject::Full(response) => Some(response.key()),
            PerformanceObject::Bare(performance) => performance.key,
        }
    }

    pub fn graph(&self) -> Option<GraphName> {
        match self {
            PerformanceObject::Full(response) => Some(response.graph()),
            PerformanceObject::Bare(performance) => performance.graph,
        }
    }

    pub fn as_response(&self) -> Option<&PerformanceResponse> {
        match self {
            PerformanceObject::Full(response) => Some(response),
            PerformanceObject::Bare(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PerformanceObject::Full(_) => "PerformanceResponse",
            PerformanceObject::Bare(_) => "Performance",
        }
    }
}

impl From<PerformanceResponse> for PerformanceObject {
    fn from(response: PerformanceResponse) -> Self {
        PerformanceObject::Full(Box::new(response))
    }
}

impl From<Performance> for PerformanceObject {
    fn from(performance: Performance) -> Self {
        PerformanceObject::Bare(performance)
    }
}
