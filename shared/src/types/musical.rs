//! Musical data model exchanged with the progression and voicing services

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::note::Note;
use crate::codec::{ChordStructureSymbol, IntervalStructure};
use crate::errors::{SharedError, SharedResult};

/// Named progression graphs, usually one per mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphName {
    MajorGraph,
    MinorGraph,
    DefaultGraph,
    MasterGraph,
    Mixed,
}

impl GraphName {
    pub fn as_str(self) -> &'static str {
        match self {
            GraphName::MajorGraph => "major_graph",
            GraphName::MinorGraph => "minor_graph",
            GraphName::DefaultGraph => "default_graph",
            GraphName::MasterGraph => "master_graph",
            GraphName::Mixed => "mixed",
        }
    }
}

impl fmt::Display for GraphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chord family suffix of a node identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordType {
    Maj,
    Min,
}

/// The fourteen scale-degree slots a progression can visit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeId {
    #[serde(rename = "NORM1+")]
    Norm1Major,
    #[serde(rename = "NORM1-")]
    Norm1Minor,
    #[serde(rename = "FLAT2+")]
    Flat2Major,
    #[serde(rename = "SHRP2-")]
    Sharp2Minor,
    #[serde(rename = "FLAT3+")]
    Flat3Major,
    #[serde(rename = "SHRP3-")]
    Sharp3Minor,
    #[serde(rename = "NORM4+")]
    Norm4Major,
    #[serde(rename = "NORM4-")]
    Norm4Minor,
    #[serde(rename = "NORM5+")]
    Norm5Major,
    #[serde(rename = "NORM5-")]
    Norm5Minor,
    #[serde(rename = "FLAT6+")]
    Flat6Major,
    #[serde(rename = "SHRP6-")]
    Sharp6Minor,
    #[serde(rename = "FLAT7+")]
    Flat7Major,
    #[serde(rename = "SHRP7-")]
    Sharp7Minor,
}

impl NodeId {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeId::Norm1Major => "NORM1+",
            NodeId::Norm1Minor => "NORM1-",
            NodeId::Flat2Major => "FLAT2+",
            NodeId::Sharp2Minor => "SHRP2-",
            NodeId::Flat3Major => "FLAT3+",
            NodeId::Sharp3Minor => "SHRP3-",
            NodeId::Norm4Major => "NORM4+",
            NodeId::Norm4Minor => "NORM4-",
            NodeId::Norm5Major => "NORM5+",
            NodeId::Norm5Minor => "NORM5-",
            NodeId::Flat6Major => "FLAT6+",
            NodeId::Sharp6Minor => "SHRP6-",
            NodeId::Flat7Major => "FLAT7+",
            NodeId::Sharp7Minor => "SHRP7-",
        }
    }

    pub fn chord_type(self) -> ChordType {
        if self.as_str().ends_with('+') {
            ChordType::Maj
        } else {
            ChordType::Min
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chord slot of a progression
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: NodeId,
    /// Major-family when true
    pub mode: bool,
    /// Stable when true
    pub tonality: bool,
    /// Signed voice-leading tendency
    pub gravity: i32,
    /// Halftone offset from the tonic
    pub base: Note,
}

/// (node id, wire symbol) pair describing one position
pub type PathNode = (NodeId, ChordStructureSymbol);

/// Request body for the progression generator; no graph means "improvise"
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRequest {
    pub graph: Option<GraphName>,
}

#[derive(Deserialize)]
struct ProgressionFields {
    graph: GraphName,
    nodes: Vec<Node>,
    structures: Vec<IntervalStructure>,
    #[serde(default)]
    orderings: Option<Vec<String>>,
    changeabilities: Vec<bool>,
}

/// Canonical progression: nodes with parallel interval structures and
/// changeability flags
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProgressionFields")]
pub struct Progression {
    graph: GraphName,
    nodes: Vec<Node>,
    structures: Vec<IntervalStructure>,
    orderings: Option<Vec<String>>,
    changeabilities: Vec<bool>,
}

impl TryFrom<ProgressionFields> for Progression {
    type Error = SharedError;

    fn try_from(fields: ProgressionFields) -> Result<Self, Self::Error> {
        Progression::new(
            fields.graph,
            fields.nodes,
            fields.structures,
            fields.changeabilities,
        )
        .map(|progression| progression.with_orderings(fields.orderings))
    }
}

impl Progression {
    pub fn new(
        graph: GraphName,
        nodes: Vec<Node>,
        structures: Vec<IntervalStructure>,
        changeabilities: Vec<bool>,
    ) -> SharedResult<Self> {
        let lengths = [nodes.len(), structures.len(), changeabilities.len()];
        if lengths.iter().any(|len| *len != nodes.len()) {
            return Err(SharedError::length_mismatch("progression", &lengths));
        }

        Ok(Self {
            graph,
            nodes,
            structures,
            orderings: None,
            changeabilities,
        })
    }

    pub fn with_orderings(mut self, orderings: Option<Vec<String>>) -> Self {
        self.orderings = orderings;
        self
    }

    pub fn graph(&self) -> GraphName {
        self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn structures(&self) -> &[IntervalStructure] {
        &self.structures
    }

    pub fn orderings(&self) -> Option<&[String]> {
        self.orderings.as_deref()
    }

    pub fn changeabilities(&self) -> &[bool] {
        &self.changeabilities
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bases(&self) -> Vec<Note> {
        self.nodes.iter().map(|node| node.base).collect()
    }

    /// Wire symbols for every structure; fails on a structure outside the alphabet
    pub fn symbols(&self) -> SharedResult<Vec<ChordStructureSymbol>> {
        self.structures.iter().map(IntervalStructure::symbol).collect()
    }

    pub fn path_nodes(&self) -> SharedResult<Vec<PathNode>> {
        let symbols = self.symbols()?;
        Ok(self
            .nodes
            .iter()
            .map(|node| node.node_id)
            .zip(symbols)
            .collect())
    }
}

#[derive(Deserialize)]
struct CheetSheetFields {
    info: Vec<PathNode>,
    structures: Vec<IntervalStructure>,
    special_cases: Vec<bool>,
    bases: Vec<Note>,
    #[serde(default)]
    key: Option<Note>,
}

/// Voicing request for the voice generator.
///
/// `info`, `structures`, `special_cases` and `bases` are parallel. A missing
/// key is drawn uniformly from the twelve notes when the sheet is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CheetSheetFields")]
pub struct CheetSheet {
    info: Vec<PathNode>,
    structures: Vec<IntervalStructure>,
    special_cases: Vec<bool>,
    bases: Vec<Note>,
    key: Note,
    #[serde(skip)]
    key_randomized: bool,
}

impl TryFrom<CheetSheetFields> for CheetSheet {
    type Error = SharedError;

    fn try_from(fields: CheetSheetFields) -> Result<Self, Self::Error> {
        let lengths = [
            fields.info.len(),
            fields.structures.len(),
            fields.special_cases.len(),
            fields.bases.len(),
        ];
        if lengths.iter().any(|len| *len != fields.info.len()) {
            return Err(SharedError::length_mismatch("cheet sheet", &lengths));
        }

        let (key, key_randomized) = match fields.key {
            Some(key) => (key, false),
            None => (Note::random(&mut rand::thread_rng()), true),
        };

        Ok(Self {
            info: fields.info,
            structures: fields.structures,
            special_cases: fields.special_cases,
            bases: fields.bases,
            key,
            key_randomized,
        })
    }
}

impl CheetSheet {
    /// Build a sheet, deriving the special-case flags from the structures
    pub fn new(
        info: Vec<PathNode>,
        structures: Vec<IntervalStructure>,
        bases: Vec<Note>,
        key: Option<Note>,
    ) -> SharedResult<Self> {
        Self::with_rng(info, structures, bases, key, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        info: Vec<PathNode>,
        structures: Vec<IntervalStructure>,
        bases: Vec<Note>,
        key: Option<Note>,
        rng: &mut R,
    ) -> SharedResult<Self> {
        let lengths = [info.len(), structures.len(), bases.len()];
        if lengths.iter().any(|len| *len != info.len()) {
            return Err(SharedError::length_mismatch("cheet sheet", &lengths));
        }

        let special_cases = structures.iter().map(IntervalStructure::is_special_case).collect();
        let (key, key_randomized) = match key {
            Some(key) => (key, false),
            None => (Note::random(rng), true),
        };

        Ok(Self {
            info,
            structures,
            special_cases,
            bases,
            key,
            key_randomized,
        })
    }

    pub fn info(&self) -> &[PathNode] {
        &self.info
    }

    pub fn structures(&self) -> &[IntervalStructure] {
        &self.structures
    }

    pub fn special_cases(&self) -> &[bool] {
        &self.special_cases
    }

    pub fn bases(&self) -> &[Note] {
        &self.bases
    }

    pub fn key(&self) -> Note {
        self.key
    }

    /// True when the key was drawn at random rather than supplied
    pub fn key_randomized(&self) -> bool {
        self.key_randomized
    }

    pub fn len(&self) -> usize {
        self.info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }
}

/// Voice generator output, opaque apart from its ticket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoMIDI {
    pub voices: Vec<Vec<i64>>,
    pub ticket: String,
}

/// Graph and (node, symbol) path of a progression
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathData {
    pub graph_name: GraphName,
    pub nodes: Vec<PathNode>,
}

/// Summary of one completed performance
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceData {
    pub perf_id: String,
    pub key: Note,
    pub path_nodes: Vec<PathNode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ChordStructureSymbol as Sym;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn node(node_id: NodeId, base: u8) -> Node {
        Node {
            node_id,
            mode: true,
            tonality: true,
            gravity: 0,
            base: Note::new(base).unwrap(),
        }
    }

    #[test]
    fn test_node_wire_format() {
        let json = r#"{"node_id":"SHRP2-","mode":true,"tonality":false,"gravity":-3,"base":2}"#;
        let parsed: Node = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.node_id, NodeId::Sharp2Minor);
        assert_eq!(parsed.gravity, -3);
        assert_eq!(parsed.node_id.chord_type(), ChordType::Min);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }

    #[test]
    fn test_graph_names() {
        assert_eq!(serde_json::to_string(&GraphName::MajorGraph).unwrap(), "\"major_graph\"");
        let mixed: GraphName = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(mixed, GraphName::Mixed);
        assert_eq!(
            serde_json::to_string(&ProgressionRequest::default()).unwrap(),
            r#"{"graph":null}"#
        );
    }

    #[test]
    fn test_progression_lengths_are_enforced() {
        let result = Progression::new(
            GraphName::MajorGraph,
            vec![node(NodeId::Norm1Major, 0)],
            vec![Sym::M3Q5O8.intervals(), Sym::m3Q5O8.intervals()],
            vec![true],
        );
        assert_matches!(result, Err(SharedError::LengthMismatch { lengths, .. }) if lengths == vec![1, 2, 1]);
    }

    #[test]
    fn test_progression_deserialization_validates() {
        let json = r#"{
            "graph": "minor_graph",
            "nodes": [{"node_id":"NORM1-","mode":false,"tonality":true,"gravity":0,"base":0}],
            "structures": [[0,12,7,3]],
            "changeabilities": [true, false]
        }"#;
        assert!(serde_json::from_str::<Progression>(json).is_err());

        let json = json.replace("[true, false]", "[false]");
        let progression: Progression = serde_json::from_str(&json).unwrap();
        assert_eq!(progression.len(), 1);
        assert_eq!(progression.orderings(), None);
        assert_eq!(progression.symbols().unwrap(), vec![Sym::m3Q5O8]);
    }

    #[test]
    fn test_path_nodes_fail_on_unknown_structure() {
        let progression = Progression::new(
            GraphName::MajorGraph,
            vec![node(NodeId::Norm1Major, 0)],
            vec![IntervalStructure::new(vec![0, 1, 2])],
            vec![true],
        )
        .unwrap();
        assert_matches!(progression.path_nodes(), Err(SharedError::UnknownStructure { .. }));
    }

    #[test]
    fn test_cheet_sheet_derives_special_cases() {
        let sheet = CheetSheet::new(
            vec![(NodeId::Norm1Major, Sym::M3Q5M9), (NodeId::Norm5Major, Sym::M3Q5O8)],
            vec![Sym::M3Q5M9.intervals(), Sym::M3Q5O8.intervals()],
            vec![Note::C, Note::new(7).unwrap()],
            Some(Note::new(4).unwrap()),
        )
        .unwrap();
        assert_eq!(sheet.special_cases(), &[true, false]);
        assert_eq!(sheet.key().value(), 4);
        assert!(!sheet.key_randomized());
    }

    #[test]
    fn test_cheet_sheet_randomizes_missing_key() {
        let mut rng = StdRng::seed_from_u64(7);
        let sheet = CheetSheet::with_rng(vec![], vec![], vec![], None, &mut rng).unwrap();
        assert!(sheet.key_randomized());
        assert!(sheet.key().value() < 12);
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_cheet_sheet_lengths_are_enforced() {
        let result = CheetSheet::new(
            vec![(NodeId::Norm1Major, Sym::M3Q5O8)],
            vec![],
            vec![Note::C],
            None,
        );
        assert_matches!(result, Err(SharedError::LengthMismatch { .. }));

        let json = r#"{"info":[["NORM1+","M3Q5O8"]],"structures":[[0,12,7,4]],"special_cases":[false,true],"bases":[0],"key":3}"#;
        assert!(serde_json::from_str::<CheetSheet>(json).is_err());
    }

    #[test]
    fn test_cheet_sheet_wire_format() {
        let sheet = CheetSheet::new(
            vec![(NodeId::Norm1Major, Sym::M3Q5O8)],
            vec![Sym::M3Q5O8.intervals()],
            vec![Note::C],
            Some(Note::new(10).unwrap()),
        )
        .unwrap();
        let value = serde_json::to_value(&sheet).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "info": [["NORM1+", "M3Q5O8"]],
                "structures": [[0, 12, 7, 4]],
                "special_cases": [false],
                "bases": [0],
                "key": 10
            })
        );
    }
}
