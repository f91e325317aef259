//! Command line arguments and file configuration
//!
//! Flags win over `config.json`; every flag can also come from a
//! `FUNKHAUS_*` environment variable (a `.env` file is loaded first).

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use orchestrator::EndpointRegistry;
use shared::{flow_warn, Workflow};

use crate::error::{GatewayError, GatewayResult};

/// Command line arguments for the gateway process
#[derive(Parser, Debug, Clone)]
#[command(name = "gateway")]
#[command(about = "Composition gateway in front of the funkhaus music services")]
pub struct Args {
    /// Server configuration file (title, host, port)
    #[arg(long, env = "FUNKHAUS_CONFIG", default_value = "config.json")]
    pub config: PathBuf,

    /// Backend endpoint list
    #[arg(long, env = "FUNKHAUS_ENDPOINTS", default_value = ".endpoints.json")]
    pub endpoints: PathBuf,

    /// Bind host, overrides the configuration file
    #[arg(long, env = "FUNKHAUS_HOST")]
    pub host: Option<String>,

    /// Bind port, overrides the configuration file
    #[arg(long, env = "FUNKHAUS_PORT")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FUNKHAUS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Do not probe the backend services on startup
    #[arg(long, env = "FUNKHAUS_SKIP_STARTUP_HEALTHCHECK")]
    pub skip_startup_healthcheck: bool,
}

fn default_title() -> String {
    "funkhaus".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Contents of `config.json`; unknown keys are ignored
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl FileConfig {
    /// Read the file, or fall back to defaults when it does not exist
    pub fn load(path: &Path) -> GatewayResult<Self> {
        if !path.exists() {
            flow_warn!(
                Workflow::Gateway,
                "No configuration file at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| GatewayError::config(format!("Invalid {}: {e}", path.display())))
    }
}

/// Fully resolved settings for one gateway process
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub title: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub startup_healthcheck: bool,
    pub endpoints: EndpointRegistry,
}

impl GatewayConfig {
    pub fn resolve(args: &Args) -> GatewayResult<Self> {
        let file = FileConfig::load(&args.config)?;
        let endpoints = EndpointRegistry::load(&args.endpoints).map_err(|e| {
            GatewayError::config(format!("Cannot load {}: {e}", args.endpoints.display()))
        })?;

        Ok(Self {
            title: file.title,
            host: args.host.clone().unwrap_or(file.host),
            port: args.port.unwrap_or(file.port),
            log_level: args.log_level.clone(),
            startup_healthcheck: !args.skip_startup_healthcheck,
            endpoints,
        })
    }
}
