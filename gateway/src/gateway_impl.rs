//! Main gateway implementation
//!
//! Wraps an `Orchestrator` behind an axum router. The transport is injected so
//! the same router runs over reqwest in production and over mocks in tests.

use axum::body::Body;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use orchestrator::{EndpointRegistry, Orchestrator, Transport};
use shared::{flow_warn, logging, Workflow};

use crate::error::{GatewayError, GatewayResult};
use crate::handlers;

/// HTTP front of the composition workflows
pub struct Gateway<T: Transport + 'static> {
    orchestrator: Orchestrator<T>,
    title: String,
}

impl<T: Transport + 'static> Clone for Gateway<T> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
            title: self.title.clone(),
        }
    }
}

impl<T: Transport + 'static> Gateway<T> {
    /// Create a new gateway with an injected transport
    pub fn new(transport: T, endpoints: EndpointRegistry, title: &str) -> Self {
        Self {
            orchestrator: Orchestrator::new(transport, endpoints),
            title: title.to_string(),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<T> {
        &self.orchestrator
    }

    /// Build the axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/generate", post(handlers::generate::<T>))
            .route("/amend/:index", post(handlers::amend::<T>))
            .route("/label", post(handlers::label::<T>))
            .route("/healthcheck", get(handlers::healthcheck::<T>))
            .layer(
                ServiceBuilder::new()
                    // One correlation id per request; latency is logged on response
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            uuid = %Uuid::new_v4(),
                            method = %request.method(),
                            uri = %request.uri(),
                        )
                    }))
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Probe the backends once; the outcome is only logged
    pub async fn probe_dependencies(&self) -> bool {
        let flow = Workflow::Gateway;
        let report = self.orchestrator.health_prober().probe().await;
        if report.all_healthy() {
            logging::log_success(&flow, "Connections to all of the microservices are established");
        } else {
            flow_warn!(
                flow,
                "Could not establish connections to all of the microservices: {}",
                report.unhealthy().join(", ")
            );
        }
        report.all_healthy()
    }

    /// Bind and serve until `shutdown` resolves
    pub async fn run<F>(&self, host: &str, port: u16, shutdown: F) -> GatewayResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind((host, port))
            .await
            .map_err(|e| GatewayError::ServerStartup(format!("Failed to bind to {host}:{port}: {e}")))?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> GatewayResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let address = listener.local_addr()?;
        logging::log_progress(&Workflow::Gateway, &self.title, &format!("listening on http://{address}"));

        let router = self.build_router();
        axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
