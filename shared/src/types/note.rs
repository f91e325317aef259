//! Halftone arithmetic over the twelve-note chromatic circle

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::errors::{SharedError, SharedResult};

/// Number of halftones in an octave
pub const HALFTONES: u8 = 12;

/// Sharp-spelled note names indexed by halftone
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A halftone in `[0, 11]`; every key and transposition is computed mod 12
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Note(u8);

impl Note {
    pub const C: Note = Note(0);

    pub fn new(value: u8) -> SharedResult<Self> {
        if value < HALFTONES {
            Ok(Self(value))
        } else {
            Err(SharedError::InvalidNote { value: value as i64 })
        }
    }

    /// Wrap any signed offset onto the circle
    pub fn wrapping(value: i64) -> Self {
        Self(value.rem_euclid(HALFTONES as i64) as u8)
    }

    /// Pick one of the twelve notes uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..HALFTONES))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }

    pub fn transpose(self, halftones: i64) -> Self {
        Self::wrapping(self.0 as i64 + halftones)
    }

    pub fn all() -> impl Iterator<Item = Note> {
        (0..HALFTONES).map(Note)
    }
}

impl Add for Note {
    type Output = Note;

    fn add(self, rhs: Note) -> Note {
        self.transpose(rhs.0 as i64)
    }
}

impl TryFrom<i64> for Note {
    type Error = SharedError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..HALFTONES as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SharedError::InvalidNote { value })
        }
    }
}

impl From<Note> for u8 {
    fn from(note: Note) -> u8 {
        note.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
