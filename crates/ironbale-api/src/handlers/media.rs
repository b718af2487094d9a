use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use ironbale_backoffice::{MediaQuery, UploadFile};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::AppState;
use crate::auth::DashboardSession;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    MediaItem, MediaListQuery, MediaListResponse, MediaStatsResponse, MediaUpdateRequest,
    UploadResponse,
};

const FALLBACK_MIME: &str = "application/octet-stream";

#[utoipa::path(
    get,
    path = "/dashboard/media",
    params(
        ("search" = Option<String>, Query, description = "Matches stored or original filename, alt text or tags"),
        ("category" = Option<String>, Query, description = "image, video, audio, document or other")
    ),
    responses(
        (status = 200, description = "Media, newest first", body = MediaListResponse),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    DashboardSession(_session): DashboardSession,
    Query(query): Query<MediaListQuery>,
) -> ApiResult<Json<MediaListResponse>> {
    let query = MediaQuery { search: query.search, category: query.category };
    let items: Vec<MediaItem> =
        state.media.list(&query).await?.into_iter().map(|record| item(&state, record)).collect();
    Ok(Json(MediaListResponse { total: items.len(), items }))
}

#[utoipa::path(
    get,
    path = "/dashboard/media/stats",
    responses(
        (status = 200, description = "Library totals", body = MediaStatsResponse),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn media_stats(
    State(state): State<Arc<AppState>>,
    DashboardSession(_session): DashboardSession,
) -> ApiResult<Json<MediaStatsResponse>> {
    Ok(Json(state.media.stats().await?.into()))
}

/// Multipart form; every part carrying a filename is one upload. Files that
/// fail are listed in `failed` and do not stop the rest.
#[utoipa::path(
    post,
    path = "/dashboard/media",
    responses(
        (status = 200, description = "Per-file upload outcome", body = UploadResponse),
        (status = 400, description = "Malformed multipart body", body = crate::error::ApiErrorResponse),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    DashboardSession(session): DashboardSession,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::validation(format!("invalid multipart body: {err}")))?
    {
        let Some(original_filename) = field.file_name().map(str::to_string) else {
            debug!(field = ?field.name(), "Skipping non-file form field");
            continue;
        };
        let mime_type = field.content_type().unwrap_or(FALLBACK_MIME).to_string();
        let bytes = field.bytes().await.map_err(|err| {
            ApiError::validation_field("file", format!("could not read '{original_filename}': {err}"))
        })?;
        files.push(UploadFile { original_filename, mime_type, bytes: bytes.to_vec() });
    }

    if files.is_empty() {
        return Err(ApiError::validation_field("file", "no files in upload"));
    }

    let report = state.media.upload(&session, files).await;
    if !report.failed.is_empty() {
        warn!(
            user = %session.user_email,
            uploaded = report.uploaded.len(),
            failed = report.failed.len(),
            "Upload finished with failures"
        );
    }
    Ok(Json(UploadResponse {
        uploaded: report.uploaded.into_iter().map(|record| item(&state, record)).collect(),
        failed: report.failed.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    patch,
    path = "/dashboard/media/{id}",
    params(("id" = Uuid, Path, description = "Media id")),
    request_body = MediaUpdateRequest,
    responses(
        (status = 200, description = "Updated record", body = MediaItem),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown media", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn update_media(
    State(state): State<Arc<AppState>>,
    DashboardSession(session): DashboardSession,
    Path(id): Path<Uuid>,
    Json(update): Json<MediaUpdateRequest>,
) -> ApiResult<Json<MediaItem>> {
    let record = state.media.update_metadata(&session, id, update.into()).await?;
    Ok(Json(item(&state, record)))
}

#[utoipa::path(
    delete,
    path = "/dashboard/media/{id}",
    params(("id" = Uuid, Path, description = "Media id")),
    responses(
        (status = 200, description = "Deleted record", body = MediaItem),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown media", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    DashboardSession(session): DashboardSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MediaItem>> {
    let record = state.media.delete(&session, id).await?;
    Ok(Json(item(&state, record)))
}

#[utoipa::path(
    post,
    path = "/dashboard/media/{id}/usage",
    params(("id" = Uuid, Path, description = "Media id")),
    responses(
        (status = 200, description = "Record with the incremented usage count", body = MediaItem),
        (status = 401, description = "No session", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Unknown media", body = crate::error::ApiErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "dashboard"
)]
pub async fn record_media_usage(
    State(state): State<Arc<AppState>>,
    DashboardSession(_session): DashboardSession,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MediaItem>> {
    let record = state.media.record_usage(id).await?;
    Ok(Json(item(&state, record)))
}

fn item(state: &AppState, record: ironbale_backoffice::MediaRecord) -> MediaItem {
    let url = state.media.public_url(&record);
    MediaItem::new(record, url)
}
