pub mod calculators;
pub mod inquiries;
pub mod media;
pub mod session;

use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::AppState;
use crate::openapi::ApiDoc;
use crate::types::HealthResponse;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "system"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.elapsed().as_secs(),
        calculators: state.calculator.names().len(),
    })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
