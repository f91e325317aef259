//! Symbol codec: chord-structure symbols on the wire, interval vectors inside
//!
//! Both alphabets are fixed. The table below is the single source of truth and
//! the codec is a bijection over it: every symbol has exactly one interval
//! vector and every listed vector names exactly one symbol.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::errors::{SharedError, SharedResult};

/// Offset of the raised ninth that voicing treats specially
pub const ALTERED_EXTENSION: u8 = 14;

/// Wire labels for chord structures.
///
/// Read as interval/degree pairs: `M3` major third, `m3` minor third,
/// `Q5` perfect fifth, `M7`/`m7` sevenths, `M9` ninth, `O8` octave doubling,
/// `M0` major tenth.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordStructureSymbol {
    M3M7M9,
    M3Q5M0,
    M3Q5M7,
    M3Q5M9,
    M3Q5O8,
    M3Q5m7,
    M3m7M9,
    m3Q5M9,
    m3Q5O8,
    m3Q5m7,
    m3m7M9,
}

use ChordStructureSymbol::*;

static CHORD_TABLE: [(ChordStructureSymbol, [u8; 4]); 11] = [
    (M3M7M9, [0, 4, 11, 14]),
    (M3Q5M0, [0, 4, 7, 16]),
    (M3Q5M7, [0, 7, 4, 11]),
    (M3Q5M9, [0, 7, 4, 14]),
    (M3Q5O8, [0, 12, 7, 4]),
    (M3Q5m7, [0, 7, 4, 10]),
    (M3m7M9, [0, 4, 10, 14]),
    (m3Q5M9, [0, 7, 3, 14]),
    (m3Q5O8, [0, 12, 7, 3]),
    (m3Q5m7, [0, 7, 3, 10]),
    (m3m7M9, [0, 3, 10, 14]),
];

/// Reverse index, built on first use and shared by the whole process
fn interval_index() -> &'static HashMap<&'static [u8], ChordStructureSymbol> {
    static INDEX: OnceLock<HashMap<&'static [u8], ChordStructureSymbol>> = OnceLock::new();
    INDEX.get_or_init(|| {
        CHORD_TABLE
            .iter()
            .map(|(symbol, intervals)| (intervals.as_slice(), *symbol))
            .collect()
    })
}

impl ChordStructureSymbol {
    pub const ALL: [ChordStructureSymbol; 11] = [
        M3M7M9, M3Q5M0, M3Q5M7, M3Q5M9, M3Q5O8, M3Q5m7, M3m7M9, m3Q5M9, m3Q5O8, m3Q5m7, m3m7M9,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            M3M7M9 => "M3M7M9",
            M3Q5M0 => "M3Q5M0",
            M3Q5M7 => "M3Q5M7",
            M3Q5M9 => "M3Q5M9",
            M3Q5O8 => "M3Q5O8",
            M3Q5m7 => "M3Q5m7",
            M3m7M9 => "M3m7M9",
            m3Q5M9 => "m3Q5M9",
            m3Q5O8 => "m3Q5O8",
            m3Q5m7 => "m3Q5m7",
            m3m7M9 => "m3m7M9",
        }
    }

    pub fn intervals(self) -> IntervalStructure {
        symbol_to_interval(self)
    }

    /// Seventh or ninth named by the trailing degree, if any
    pub fn quality(self) -> Option<u8> {
        match self.as_str().chars().last() {
            Some('7') => Some(7),
            Some('9') => Some(9),
            _ => None,
        }
    }
}

impl fmt::Display for ChordStructureSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChordStructureSymbol {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|symbol| symbol.as_str() == s)
            .ok_or_else(|| SharedError::UnknownSymbol { symbol: s.to_string() })
    }
}

/// Ordered halftone offsets from the bass note of a chord
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalStructure(Vec<u8>);

impl IntervalStructure {
    pub fn new(offsets: Vec<u8>) -> Self {
        Self(offsets)
    }

    pub fn offsets(&self) -> &[u8] {
        &self.0
    }

    pub fn symbol(&self) -> SharedResult<ChordStructureSymbol> {
        interval_to_symbol(self)
    }

    pub fn is_special_case(&self) -> bool {
        special_case(self)
    }
}

impl From<[u8; 4]> for IntervalStructure {
    fn from(offsets: [u8; 4]) -> Self {
        Self(offsets.to_vec())
    }
}

pub fn symbol_to_interval(symbol: ChordStructureSymbol) -> IntervalStructure {
    CHORD_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == symbol)
        .map(|(_, intervals)| IntervalStructure::from(*intervals))
        // Every variant is listed in CHORD_TABLE
        .unwrap_or_else(|| unreachable!("{symbol} missing from chord table"))
}

pub fn interval_to_symbol(intervals: &IntervalStructure) -> SharedResult<ChordStructureSymbol> {
    interval_index()
        .get(intervals.offsets())
        .copied()
        .ok_or_else(|| SharedError::UnknownStructure {
            intervals: intervals.offsets().to_vec(),
        })
}

/// True iff the raised ninth is present
pub fn special_case(intervals: &IntervalStructure) -> bool {
    intervals.offsets().contains(&ALTERED_EXTENSION)
}
