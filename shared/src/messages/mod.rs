//! Message types sent to backend services
//!
//! - `telemetry`: session, user and label facts for the accounting service

pub mod telemetry;

pub use telemetry::{
    LabelData, PerformanceFlag, SessionData, TelemetryFact, Ticket, User, UserData,
    UNKNOWN_SESSION,
};
