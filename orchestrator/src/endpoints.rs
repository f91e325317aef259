//! Backend endpoint registry
//!
//! Endpoints are loaded once from a JSON list and never mutated afterwards.
//! Route suffixes (an amend index, a render format) are applied to copies.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use crate::error::{OrchestratorError, OrchestratorResult};

/// Endpoint names the gateway cannot run without
pub mod names {
    pub const GENERATE: &str = "micropathforger/generate";
    pub const AMEND: &str = "micropathforger/amend";
    pub const PERFORM: &str = "microvoicemaster/perform";
    pub const SAVEMIDI: &str = "microbureaucrat/savemidi";
    pub const PEOPLE: &str = "microaccountant/people";
    pub const DATA: &str = "microaccountant/data";

    pub const REQUIRED: [&str; 6] = [GENERATE, AMEND, PERFORM, SAVEMIDI, PEOPLE, DATA];
}

/// Path every backend service answers health probes on
pub const HEALTH_PATH: &str = "healthcheck";

fn default_prefix() -> String {
    "http://".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(u16),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match PortRepr::deserialize(deserializer)? {
        PortRepr::Number(port) => Ok(port),
        PortRepr::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// One named backend route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    pub path: String,
    #[serde(default)]
    pub option: Option<String>,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Endpoint {
    pub fn new(name: &str, host: &str, port: u16, path: &str) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
            port,
            path: path.to_string(),
            option: None,
            prefix: default_prefix(),
        }
    }

    /// Copy of this endpoint with a route suffix
    pub fn with_option(&self, option: impl Into<String>) -> Self {
        Self {
            option: Some(option.into()),
            ..self.clone()
        }
    }

    pub fn url(&self) -> String {
        self.to_string()
    }

    /// Service part of the name, e.g. `micropathforger`
    pub fn service(&self) -> &str {
        self.name.split('/').next().unwrap_or(&self.name)
    }

    /// Health probe route on the same host
    pub fn healthpoint(&self) -> Self {
        Self {
            name: format!("{}/{HEALTH_PATH}", self.service()),
            path: HEALTH_PATH.to_string(),
            option: None,
            ..self.clone()
        }
    }

    fn validate(&self) -> OrchestratorResult<()> {
        url::Url::parse(&self.url())
            .map(|_| ())
            .map_err(|e| OrchestratorError::InvalidEndpoint {
                name: self.name.clone(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}/{}", self.prefix, self.host, self.port, self.path)?;
        if let Some(option) = &self.option {
            write!(f, "/{option}")?;
        }
        Ok(())
    }
}

/// The six backend routes, resolved at load time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointRegistry {
    pub generate: Endpoint,
    pub amend: Endpoint,
    pub perform: Endpoint,
    pub savemidi: Endpoint,
    pub people: Endpoint,
    pub data: Endpoint,
}

impl EndpointRegistry {
    /// Resolve the required endpoints from a list of entries.
    /// Later duplicates replace earlier ones; unknown names are ignored.
    pub fn from_entries(entries: Vec<Endpoint>) -> OrchestratorResult<Self> {
        let mut by_name: HashMap<String, Endpoint> = HashMap::new();
        for entry in entries {
            entry.validate()?;
            by_name.insert(entry.name.clone(), entry);
        }

        let mut take = |name: &str| {
            by_name
                .remove(name)
                .ok_or_else(|| OrchestratorError::MissingEndpoint {
                    name: name.to_string(),
                })
        };

        Ok(Self {
            generate: take(names::GENERATE)?,
            amend: take(names::AMEND)?,
            perform: take(names::PERFORM)?,
            savemidi: take(names::SAVEMIDI)?,
            people: take(names::PEOPLE)?,
            data: take(names::DATA)?,
        })
    }

    pub fn from_json(json: &str) -> OrchestratorResult<Self> {
        let entries: Vec<Endpoint> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn load(path: &Path) -> OrchestratorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn all(&self) -> [&Endpoint; 6] {
        [
            &self.generate,
            &self.amend,
            &self.perform,
            &self.savemidi,
            &self.people,
            &self.data,
        ]
    }

    /// One health probe route per distinct backend service, ordered by name
    pub fn healthpoints(&self) -> Vec<Endpoint> {
        let mut by_service: BTreeMap<&str, Endpoint> = BTreeMap::new();
        for endpoint in self.all() {
            by_service
                .entry(endpoint.service())
                .or_insert_with(|| endpoint.healthpoint());
        }
        by_service.into_values().collect()
    }
}
