use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::calculators::calculate;
use crate::AppState;
use crate::auth::DashboardSession;
use crate::error::ApiResult;
use crate::types::{
    ContactDetails, InquiryListQuery, InquiryListResponse, InquiryStatusUpdate, InquiryView,
    QuoteRequest, QuoteResponse,
};

#[utoipa::path(
    post,
    path = "/inquiries",
    request_body = ContactDetails,
    responses(
        (status = 201, description = "Inquiry stored", body = InquiryView),
        (status = 400, description = "Invalid contact details", body = crate::error::ApiErrorResponse)
    ),
    tag = "inquiries"
)]
pub async fn submit_inquiry(
    State(state): State<Arc<AppState>>,
    Json(contact): Json<ContactDetails>,
) -> ApiResult<(StatusCode, Json<InquiryView>)> {
    let inquiry = state.inquiries.submit(contact.into_inquiry(None, None)).await?;
    Ok((StatusCode::CREATED, Json(inquiry.into())))
}

/// Runs the named calculator on the submitted fields and files the result
/// with the contact details as a `calculator:<name>` inquiry.
#[utoipa::path(
    post,
    path = "/quote",
    request_body = QuoteRequest,
    responses(
        (status = 201, description = "Quote request stored", body = QuoteResponse),
        (status = 400, description = "Invalid contact details", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown calculator", body = crate::error::ApiErrorResponse)
    ),
    tag = "inquiries"
)]
pub async fn request_quote(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> ApiResult<(StatusCode, Json<QuoteResponse>)> {
    let estimate = calculate(&state, &request.calculator, &request.fields)?;
    let attached = serde_json::to_value(&estimate).map_err(anyhow::Error::from)?;
    let source = format!("calculator:{}", request.calculator);

    let inquiry =
        state.inquiries.submit(request.contact.into_inquiry(Some(source), Some(attached))).await?;
    info!(inquiry_id = %inquiry.id, calculator = %estimate.calculator, "Quote requested");
    Ok((StatusCode::CREATED, Json(QuoteResponse { inquiry: inquiry.into(), estimate })))
}

#[utoipa::path(
    get,
    path = "/dashboard/inquiries",
    params(("status" = Option<String>, Query, description = "new, contacted, quoted or closed")),
    responses(
        (status = 200, description = "Inquiries, newest first", body = InquiryListResponse),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn list_inquiries(
    State(state): State<Arc<AppState>>,
    DashboardSession(_session): DashboardSession,
    Query(query): Query<InquiryListQuery>,
) -> ApiResult<Json<InquiryListResponse>> {
    let items: Vec<InquiryView> =
        state.inquiries.list(query.status).await?.into_iter().map(Into::into).collect();
    Ok(Json(InquiryListResponse { total: items.len(), items }))
}

#[utoipa::path(
    patch,
    path = "/dashboard/inquiries/{id}",
    params(("id" = Uuid, Path, description = "Inquiry id")),
    request_body = InquiryStatusUpdate,
    responses(
        (status = 200, description = "Updated inquiry", body = InquiryView),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown inquiry", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn update_inquiry_status(
    State(state): State<Arc<AppState>>,
    DashboardSession(session): DashboardSession,
    Path(id): Path<Uuid>,
    Json(update): Json<InquiryStatusUpdate>,
) -> ApiResult<Json<InquiryView>> {
    let inquiry = state.inquiries.update_status(&session, id, update.status).await?;
    Ok(Json(inquiry.into()))
}
