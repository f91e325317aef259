//! Core types used throughout the gateway

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod musical;
pub mod note;
pub mod performance;

pub use musical::*;
pub use note::*;
pub use performance::*;

/// The gateway's request workflows, used to tag log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workflow {
    Generate,
    Amend,
    Label,
    Healthcheck,
    /// Process lifecycle outside any request
    Gateway,
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workflow::Generate => write!(f, "generate"),
            Workflow::Amend => write!(f, "amend"),
            Workflow::Label => write!(f, "label"),
            Workflow::Healthcheck => write!(f, "healthcheck"),
            Workflow::Gateway => write!(f, "gateway"),
        }
    }
}
