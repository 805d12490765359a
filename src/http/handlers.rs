//! Registration, deregistration and query handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::health::HealthResponse;
use crate::http::request::{GetHostStatusesResponse, HostRequest};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::registry::Status;

/// `POST /service-id/register`: add a host at `Unknown`.
pub async fn register_host(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let request = parse_host_request(&body)?;
    state.store.register(&request.service_id, &request.host);

    tracing::info!(service_id = %request.service_id, host = %request.host, "Host registered");
    Ok(StatusCode::CREATED)
}

/// `POST /service-id/remove`: drop a host; succeeds whether or not it was registered.
pub async fn remove_host(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let request = parse_host_request(&body)?;
    let removed = state.store.remove(&request.service_id, &request.host);

    tracing::info!(service_id = %request.service_id, host = %request.host, removed, "Host deregistered");
    Ok(StatusCode::OK)
}

/// `GET /service-id/{service_id}`: current hosts and statuses of a service.
pub async fn get_host_statuses(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Json<GetHostStatusesResponse> {
    Json(GetHostStatusesResponse {
        host_statuses: state.store.get(&service_id),
    })
}

/// `GET /health`: the registry's own health document.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: Status::Healthy,
    })
}

fn parse_host_request(body: &[u8]) -> Result<HostRequest, ApiError> {
    let request: HostRequest = serde_json::from_slice(body)?;
    request.validate()?;
    Ok(request)
}
