//! Route handlers
//!
//! Handlers only translate between HTTP and the orchestrator. The peer
//! address is optional so routers driven without a socket still work.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{ConnectInfo, Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::net::SocketAddr;

use orchestrator::Transport;
use shared::{flow_debug, PerformanceResponse, Workflow};

use crate::error::GatewayResult;
use crate::gateway_impl::Gateway;
use crate::models::{AmendmentRequest, Identified, LabelingRequest, PerformanceRequest};

fn peer(connect_info: Option<ConnectInfo<SocketAddr>>) -> Option<SocketAddr> {
    connect_info.map(|ConnectInfo(address)| address)
}

/// `POST /generate`
pub async fn generate<T: Transport + 'static>(
    State(gateway): State<Gateway<T>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<PerformanceRequest>, JsonRejection>,
) -> GatewayResult<Json<PerformanceResponse>> {
    let Json(request) = payload?;
    let caller = request.caller(peer(connect_info));
    flow_debug!(Workflow::Generate, sess_id = %caller.sess_id, "Accepted request");

    let outcome = gateway
        .orchestrator()
        .generate(&caller, &request.performance_object)
        .await?;
    Ok(Json(outcome.into_value()))
}

/// `POST /amend/{index}`
pub async fn amend<T: Transport + 'static>(
    State(gateway): State<Gateway<T>>,
    index: Result<Path<usize>, PathRejection>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<AmendmentRequest>, JsonRejection>,
) -> GatewayResult<Json<PerformanceResponse>> {
    let Path(index) = index?;
    let Json(request) = payload?;
    let caller = request.caller(peer(connect_info));
    flow_debug!(Workflow::Amend, sess_id = %caller.sess_id, index, "Accepted request");

    let outcome = gateway
        .orchestrator()
        .amend(&caller, request.performance_object, index)
        .await?;
    Ok(Json(outcome.into_value()))
}

/// `POST /label`, answers 201 once both facts are stored
pub async fn label<T: Transport + 'static>(
    State(gateway): State<Gateway<T>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    payload: Result<Json<LabelingRequest>, JsonRejection>,
) -> GatewayResult<StatusCode> {
    let Json(request) = payload?;
    let caller = request.caller(peer(connect_info));
    flow_debug!(Workflow::Label, sess_id = %caller.sess_id, ticket = %request.ticket, "Accepted request");

    gateway
        .orchestrator()
        .label(&caller, request.ticket, request.flag)
        .await?;
    Ok(StatusCode::CREATED)
}

/// `GET /healthcheck`: 200 when every backend answers, 429 otherwise
pub async fn healthcheck<T: Transport + 'static>(
    State(gateway): State<Gateway<T>>,
) -> GatewayResult<StatusCode> {
    let report = gateway.orchestrator().healthcheck().await?;
    flow_debug!(Workflow::Healthcheck, services = report.services.len(), "All remotes healthy");
    Ok(StatusCode::OK)
}
