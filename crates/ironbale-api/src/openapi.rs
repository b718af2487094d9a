use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ApiErrorResponse;
use crate::handlers;
use crate::types::*;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ironbale API",
        description = "Equipment calculators, quote requests and the media/inquiry dashboard"
    ),
    paths(
        handlers::health,
        handlers::calculators::list_calculators,
        handlers::calculators::calculator_defaults,
        handlers::calculators::run_calculator,
        handlers::inquiries::submit_inquiry,
        handlers::inquiries::request_quote,
        handlers::inquiries::list_inquiries,
        handlers::inquiries::update_inquiry_status,
        handlers::session::login,
        handlers::session::logout,
        handlers::session::current_session,
        handlers::media::list_media,
        handlers::media::media_stats,
        handlers::media::upload_media,
        handlers::media::update_media,
        handlers::media::delete_media,
        handlers::media::record_media_usage,
    ),
    components(schemas(
        ApiErrorResponse,
        HealthResponse,
        CalculatorSummary,
        CalculatorListResponse,
        CalculationResponse,
        ContactDetails,
        QuoteRequest,
        QuoteResponse,
        InquiryView,
        InquiryListResponse,
        InquiryStatusUpdate,
        LoginRequest,
        SessionResponse,
        MediaItem,
        MediaListResponse,
        MediaUpdateRequest,
        MediaStatsResponse,
        UploadFailureView,
        UploadResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "calculators", description = "Stateless equipment estimators"),
        (name = "inquiries", description = "Contact form and quote requests"),
        (name = "auth", description = "Dashboard sign-in"),
        (name = "dashboard", description = "Media library and inquiry management"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
