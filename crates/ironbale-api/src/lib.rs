#![deny(warnings)]
//! Ironbale HTTP API
//!
//! Public routes run the equipment calculators and take contact and quote
//! inquiries. Dashboard routes manage the media library and inquiries and
//! require a bearer session.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use chrono::{DateTime, Utc};
use ironbale_backoffice::{
    InMemoryInquiryRepository, InMemoryMediaRepository, InMemoryObjectStorage,
    InMemorySessionProvider, InquiryDesk, MediaLibrary, SessionProvider,
};
use ironbale_calculator::Calculator;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod types;

pub use config::IronbaleConfig;

/// Shared state behind every route.
pub struct AppState {
    pub config: IronbaleConfig,
    pub calculator: Calculator,
    pub sessions: Arc<dyn SessionProvider>,
    pub media: MediaLibrary,
    pub inquiries: InquiryDesk,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    /// State backed by the in-memory session, media and inquiry stores.
    pub fn in_memory(config: IronbaleConfig) -> Self {
        if config.auth.operators.is_empty() {
            warn!("No dashboard operators configured; dashboard sign-in is disabled");
        }
        if config.limits.upload_exceeds_body() {
            warn!(
                max_upload_mb = config.limits.max_upload_mb,
                max_body_size_mb = config.limits.max_body_size_mb,
                "Upload limit exceeds the request body limit; the body limit applies"
            );
        }

        let sessions = InMemorySessionProvider::new(config.auth.operators.clone(), config.session_ttl());
        let storage =
            InMemoryObjectStorage::new(&config.storage.bucket, &config.storage.public_base_url);
        let media = MediaLibrary::new(
            Arc::new(InMemoryMediaRepository::new()),
            Arc::new(storage),
            config.limits.max_upload_bytes(),
        );
        let inquiries = InquiryDesk::new(Arc::new(InMemoryInquiryRepository::new()));

        info!(
            env = %config.environment.env_type,
            operators = config.auth.operators.len(),
            bucket = %config.storage.bucket,
            "Initialized application state"
        );

        Self {
            calculator: Calculator::new(),
            sessions: Arc::new(sessions),
            media,
            inquiries,
            start_time: Utc::now(),
            config,
        }
    }

    pub fn elapsed(&self) -> Duration {
        (Utc::now() - self.start_time).to_std().unwrap_or_default()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    use handlers::{calculators, inquiries, media, session};

    let max_body = state.config.limits.max_body_bytes();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(handlers::openapi_json))
        .route("/calculators", get(calculators::list_calculators))
        .route("/calculators/{name}/defaults", get(calculators::calculator_defaults))
        .route("/calculators/{name}", post(calculators::run_calculator))
        .route("/quote", post(inquiries::request_quote))
        .route("/inquiries", post(inquiries::submit_inquiry))
        .route("/auth/login", post(session::login))
        .route("/auth/logout", post(session::logout))
        .route("/dashboard/session", get(session::current_session))
        .route("/dashboard/media", get(media::list_media).post(media::upload_media))
        .route("/dashboard/media/stats", get(media::media_stats))
        .route("/dashboard/media/{id}", patch(media::update_media).delete(media::delete_media))
        .route("/dashboard/media/{id}/usage", post(media::record_media_usage))
        .route("/dashboard/inquiries", get(inquiries::list_inquiries))
        .route("/dashboard/inquiries/{id}", patch(inquiries::update_inquiry_status))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::disable())
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(max_body)),
        )
        .with_state(state)
}

pub async fn create_app(config: IronbaleConfig) -> anyhow::Result<Router> {
    let state = Arc::new(AppState::in_memory(config));
    Ok(router(state))
}
