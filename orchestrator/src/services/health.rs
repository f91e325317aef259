//! Health prober for the backend services

use futures_util::future::join_all;
use std::sync::Arc;

use shared::{flow_debug, flow_warn, Workflow};

use crate::endpoints::Endpoint;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::Transport;

/// Outcome of probing one backend service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceHealth {
    pub name: String,
    pub healthy: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HealthReport {
    pub services: Vec<ServiceHealth>,
}

impl HealthReport {
    pub fn all_healthy(&self) -> bool {
        self.services.iter().all(|service| service.healthy)
    }

    pub fn unhealthy(&self) -> Vec<String> {
        self.services
            .iter()
            .filter(|service| !service.healthy)
            .map(|service| service.name.clone())
            .collect()
    }

    pub fn into_result(self) -> OrchestratorResult<Self> {
        if self.all_healthy() {
            Ok(self)
        } else {
            Err(OrchestratorError::Unhealthy {
                unhealthy: self.unhealthy(),
            })
        }
    }
}

/// Pings every health route concurrently
pub struct HealthProber<T: Transport> {
    transport: Arc<T>,
    healthpoints: Vec<Endpoint>,
}

impl<T: Transport> HealthProber<T> {
    pub fn new(transport: Arc<T>, healthpoints: Vec<Endpoint>) -> Self {
        Self {
            transport,
            healthpoints,
        }
    }

    pub fn healthpoints(&self) -> &[Endpoint] {
        &self.healthpoints
    }

    /// Probe all services; a failed exchange counts as unhealthy
    pub async fn probe(&self) -> HealthReport {
        let probes = self.healthpoints.iter().map(|endpoint| async move {
            let healthy = match self.transport.ping(endpoint).await {
                Ok(healthy) => healthy,
                Err(e) => {
                    flow_warn!(Workflow::Healthcheck, endpoint = %endpoint.name, "Health probe failed: {e}");
                    false
                }
            };
            flow_debug!(Workflow::Healthcheck, endpoint = %endpoint.name, healthy, "Probed");
            ServiceHealth {
                name: endpoint.name.clone(),
                healthy,
            }
        });

        HealthReport {
            services: join_all(probes).await,
        }
    }
}
