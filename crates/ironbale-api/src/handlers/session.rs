use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::AppState;
use crate::auth::DashboardSession;
use crate::error::ApiResult;
use crate::types::{LoginRequest, SessionResponse};

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued", body = SessionResponse),
        (status = 401, description = "Unknown operator or wrong key", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let session = state.sessions.sign_in(&request.email, &request.api_key).await?;
    Ok(Json(session.into()))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session ended"),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    DashboardSession(session): DashboardSession,
) -> ApiResult<StatusCode> {
    state.sessions.sign_out(&session.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/dashboard/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn current_session(DashboardSession(session): DashboardSession) -> Json<SessionResponse> {
    Json(session.into())
}
