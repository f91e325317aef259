//! Shared error types for the composition gateway

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Unknown interval structure: {intervals:?}")]
    UnknownStructure { intervals: Vec<u8> },

    #[error("Unknown chord structure symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("Note out of range: {value} (expected 0-11)")]
    InvalidNote { value: i64 },

    #[error("Parallel lists differ in length for {context}: {lengths:?}")]
    LengthMismatch { context: String, lengths: Vec<usize> },

    #[error("Not enough data to build a {target}")]
    InsufficientData { target: String },

    #[error("Invalid ticket: {ticket}")]
    InvalidTicket { ticket: String },
}

impl SharedError {
    pub fn length_mismatch(context: &str, lengths: &[usize]) -> Self {
        Self::LengthMismatch {
            context: context.to_string(),
            lengths: lengths.to_vec(),
        }
    }

    pub fn insufficient(target: &str) -> Self {
        Self::InsufficientData {
            target: target.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
