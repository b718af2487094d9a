use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use ironbale_backoffice::Session;
use std::sync::Arc;
use tracing::debug;

use crate::AppState;
use crate::error::ApiError;

/// The operator session behind a dashboard request, resolved from the
/// `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct DashboardSession(pub Session);

impl FromRequestParts<Arc<AppState>> for DashboardSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::authentication("missing bearer token"))?;
        let session = state.sessions.acquire(token).await.map_err(|err| {
            debug!(path = %parts.uri.path(), error = %err, "Dashboard session rejected");
            ApiError::from(err)
        })?;
        Ok(DashboardSession(session))
    }
}

pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
