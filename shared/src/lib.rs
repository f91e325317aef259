//! Shared types for the funkhaus composition gateway
//!
//! Holds the musical data model, the chord-symbol codec, telemetry messages
//! and the logging setup used by both the orchestrator and the gateway.

pub mod adapters;
pub mod codec;
pub mod errors;
pub mod logging;
pub mod messages;
pub mod types;

pub use codec::{ChordStructureSymbol, IntervalStructure};
pub use errors::*;
pub use types::*;

pub use messages::{
    LabelData, PerformanceFlag, SessionData, TelemetryFact, Ticket, User, UserData,
    UNKNOWN_SESSION,
};
