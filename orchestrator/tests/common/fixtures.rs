//! Test fixtures and data for orchestrator tests
//!
//! Canned backend replies and a previously served performance, shared by all
//! test suites.

use orchestrator::endpoints::names;
use orchestrator::{Caller, Endpoint, EndpointRegistry};
use serde_json::{json, Value};
use shared::{PerformanceResponse, User};
use std::net::Ipv4Addr;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const BACKEND_HOST: &'static str = "backend";
    pub const BACKEND_PORT: u16 = 8000;
    pub const TICKET: &'static str = "8120674621874145142";
    pub const HEX_BLOB: &'static str = "4d546864000000060000000100404d54726b";

    pub fn session() -> Ipv4Addr {
        Ipv4Addr::new(192, 0, 0, 1)
    }

    pub fn user() -> User {
        User {
            email: "ada.lovelace@aol.com".to_string(),
            name_given: "Ada".to_string(),
            name_family: "Lovelace".to_string(),
        }
    }

    pub fn anonymous() -> Caller {
        Caller::anonymous(Self::session())
    }

    pub fn registered() -> Caller {
        Caller {
            sess_id: Self::session(),
            user: Some(Self::user()),
        }
    }

    /// Registry whose endpoint paths equal their names
    pub fn registry() -> EndpointRegistry {
        let entries = names::REQUIRED
            .iter()
            .map(|name| Endpoint::new(name, Self::BACKEND_HOST, Self::BACKEND_PORT, name))
            .collect();
        EndpointRegistry::from_entries(entries).unwrap()
    }

    fn nodes() -> Value {
        json!([
            {"node_id": "NORM1+", "mode": true, "tonality": true, "gravity": 0, "base": 0},
            {"node_id": "SHRP2-", "mode": true, "tonality": false, "gravity": -3, "base": 2},
            {"node_id": "SHRP3-", "mode": true, "tonality": false, "gravity": 1, "base": 4},
            {"node_id": "NORM4+", "mode": true, "tonality": true, "gravity": 2, "base": 5}
        ])
    }

    /// Progression as the progression service returns it
    pub fn progression_json() -> String {
        json!({
            "graph": "major_graph",
            "nodes": Self::nodes(),
            "structures": [[0, 7, 4, 11], [0, 12, 7, 3], [0, 7, 3, 10], [0, 12, 7, 4]],
            "orderings": null,
            "changeabilities": [true, true, false, true]
        })
        .to_string()
    }

    /// Same graph with the second chord replaced
    pub fn amended_progression_json() -> String {
        json!({
            "graph": "major_graph",
            "nodes": [
                {"node_id": "NORM1+", "mode": true, "tonality": true, "gravity": 0, "base": 0},
                {"node_id": "NORM5+", "mode": true, "tonality": true, "gravity": 3, "base": 7},
                {"node_id": "SHRP3-", "mode": true, "tonality": false, "gravity": 1, "base": 4},
                {"node_id": "NORM4+", "mode": true, "tonality": true, "gravity": 2, "base": 5}
            ],
            "structures": [[0, 7, 4, 11], [0, 7, 4, 14], [0, 7, 3, 10], [0, 12, 7, 4]],
            "changeabilities": [true, true, false, true]
        })
        .to_string()
    }

    pub fn pseudo_midi_json() -> String {
        json!({
            "voices": [[58, 62, 65, 69], [60, 63, 67, 72], [62, 65, 69, 72], [63, 67, 70, 75]],
            "ticket": Self::TICKET
        })
        .to_string()
    }

    /// The renderer answers with a JSON string
    pub fn hex_blob_json() -> String {
        Value::String(Self::HEX_BLOB.to_string()).to_string()
    }

    /// A performance served earlier, as a client would send it back
    pub fn raw_performance() -> Value {
        json!({
            "key": 10,
            "graph": "major_graph",
            "ticket": Self::TICKET,
            "hex_blob": Self::HEX_BLOB,
            "structures": ["M3Q5M7", "m3Q5O8", "m3Q5m7", "M3Q5O8"],
            "changeabilities": [true, true, false, true],
            "human_readable": [
                ["A#", "maj", 7],
                ["C", "min", null],
                ["D", "min", 7],
                ["D#", "maj", null]
            ],
            "nodes": Self::nodes()
        })
    }

    pub fn performance_response() -> PerformanceResponse {
        serde_json::from_value(Self::raw_performance()).unwrap()
    }
}
