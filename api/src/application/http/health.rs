use axum::{Router, extract::State, routing::get};
use diasense_core::domain::common::services::ServiceCapabilities;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub capabilities: ServiceCapabilities,
}

#[derive(OpenApi)]
#[openapi(paths(root, health))]
pub struct HealthApiDoc;

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    summary = "Liveness banner",
    responses((status = 200, body = StatusResponse)),
)]
pub async fn root() -> Result<Response<StatusResponse>, ApiError> {
    Ok(Response::OK(StatusResponse {
        status: "DiaSense AI Server is running".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Configured capabilities",
    responses((status = 200, body = HealthResponse)),
)]
pub async fn health(State(state): State<AppState>) -> Result<Response<HealthResponse>, ApiError> {
    Ok(Response::OK(HealthResponse {
        status: "ok".to_string(),
        capabilities: state.service.capabilities(),
    }))
}

pub fn health_routes(root_path: &str) -> Router<AppState> {
    let root_route = if root_path.is_empty() { "/" } else { root_path };

    Router::new()
        .route(root_route, get(root))
        .route(&format!("{}/health", root_path), get(health))
}
