//! HTTP-level tests for the public calculator routes and the dashboard.

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use ironbale_api::types::*;
use ironbale_api::{IronbaleConfig, create_app};
use serde_json::{Value, json};

const OPERATOR: &str = "sales@ironbale.example";
const API_KEY: &str = "test-key";

fn test_config() -> IronbaleConfig {
    IronbaleConfig::from_toml(&format!(
        r#"
[environment]
env_type = "test"

[limits]
max_body_size_mb = 8
max_upload_mb = 1

[auth]
session_ttl_minutes = 30
operators = [{{ email = "{OPERATOR}", api_key = "{API_KEY}" }}]

[storage]
bucket = "media"
public_base_url = "https://cdn.ironbale.example"
"#
    ))
    .expect("test configuration parses")
}

async fn create_test_server() -> TestServer {
    let app = create_app(test_config()).await.expect("Failed to create app");
    TestServer::new(app).expect("Failed to create test server")
}

async fn sign_in(server: &TestServer) -> String {
    let response =
        server.post("/auth/login").json(&json!({ "email": OPERATOR, "api_key": API_KEY })).await;
    response.assert_status_ok();
    response.json::<SessionResponse>().token
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();

    let health: HealthResponse = response.json();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.calculators, 5);
}

#[tokio::test]
async fn test_calculator_listing_and_defaults() {
    let server = create_test_server().await;

    let listing: CalculatorListResponse = server.get("/calculators").await.json();
    let names: Vec<&str> = listing.calculators.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["bale_density", "baler_sizing", "roi", "shredder_power", "throughput_capacity"]
    );

    let defaults: Value = server.get("/calculators/roi/defaults").await.json();
    assert_eq!(defaults["equipment_cost"], json!(500000.0));

    server.get("/calculators/compactor/defaults").await.assert_status_not_found();
}

#[tokio::test]
async fn test_roi_defaults_through_http() {
    let server = create_test_server().await;
    let response = server.post("/calculators/roi").json(&json!({})).await;
    response.assert_status_ok();

    let body: CalculationResponse = response.json();
    assert_eq!(body.calculator, "roi");
    assert_eq!(body.result["net_annual_profit"], json!(225000.0));
    let payback = body.result["payback_years"].as_f64().unwrap();
    assert!((payback - 550_000.0 / 225_000.0).abs() < 1e-9);
    assert_eq!(body.result["status"], "good");
}

#[tokio::test]
async fn test_baler_sizing_coerces_form_strings() {
    let server = create_test_server().await;
    let response = server
        .post("/calculators/baler_sizing")
        .json(&json!({ "material": "cardboard", "daily_volume_tons": "40", "operating_hours": "abc" }))
        .await;
    response.assert_status_ok();

    let body: CalculationResponse = response.json();
    assert_eq!(body.inputs["daily_volume_tons"], json!(40.0));
    assert_eq!(body.inputs["operating_hours"], json!(8.0));
    assert_eq!(body.result["recommended_model"], json!("HB-300"));
    assert_eq!(body.result["cycle_time_seconds"], json!(45.0));
}

#[tokio::test]
async fn test_calculator_rejects_non_object_body() {
    let server = create_test_server().await;
    let response = server.post("/calculators/roi").json(&json!([1, 2, 3])).await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    server.post("/calculators/compactor").json(&json!({})).await.assert_status_not_found();
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let server = create_test_server().await;

    for path in ["/dashboard/session", "/dashboard/media", "/dashboard/inquiries"] {
        let response = server.get(path).await;
        response.assert_status_unauthorized();
        let body: Value = response.json();
        assert_eq!(body["code"], "AUTHENTICATION_ERROR");
        assert_eq!(body["redirect"], "/login");
    }

    server.get("/dashboard/media").authorization_bearer("forged").await.assert_status_unauthorized();

    let response =
        server.post("/auth/login").json(&json!({ "email": OPERATOR, "api_key": "wrong" })).await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_login_session_and_logout() {
    let server = create_test_server().await;
    let token = sign_in(&server).await;

    let session: SessionResponse =
        server.get("/dashboard/session").authorization_bearer(&token).await.json();
    assert_eq!(session.user_email, OPERATOR);

    server
        .post("/auth/logout")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server.get("/dashboard/session").authorization_bearer(&token).await.assert_status_unauthorized();
}

#[tokio::test]
async fn test_quote_request_reaches_dashboard() {
    let server = create_test_server().await;

    let response = server
        .post("/quote")
        .json(&json!({
            "calculator": "baler_sizing",
            "fields": { "daily_volume_tons": 40, "operating_hours": 8 },
            "name": "Dana Ortiz",
            "email": "dana@recycler.example",
            "company": "Ortiz Recycling",
            "message": "Interested in the recommended baler"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let quote: QuoteResponse = response.json();
    assert_eq!(quote.inquiry.source, "calculator:baler_sizing");
    assert_eq!(quote.estimate.result["recommended_model"], json!("HB-300"));
    let attached = quote.inquiry.estimate.clone().unwrap();
    assert_eq!(attached["calculator"], "baler_sizing");
    assert_eq!(attached["result"], quote.estimate.result);

    server
        .post("/inquiries")
        .json(&json!({ "name": "Lee", "email": "lee@plant.example", "message": "Call me" }))
        .await
        .assert_status(StatusCode::CREATED);

    let token = sign_in(&server).await;
    let listing: InquiryListResponse =
        server.get("/dashboard/inquiries").authorization_bearer(&token).await.json();
    assert_eq!(listing.total, 2);

    let updated: InquiryView = server
        .patch(&format!("/dashboard/inquiries/{}", quote.inquiry.id))
        .authorization_bearer(&token)
        .json(&json!({ "status": "quoted" }))
        .await
        .json();
    assert_eq!(serde_json::to_value(updated.status).unwrap(), "quoted");

    let quoted: InquiryListResponse = server
        .get("/dashboard/inquiries")
        .add_query_param("status", "quoted")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(quoted.total, 1);
    assert_eq!(quoted.items[0].id, quote.inquiry.id);
}

#[tokio::test]
async fn test_inquiry_validation() {
    let server = create_test_server().await;
    let response = server
        .post("/inquiries")
        .json(&json!({ "name": "Lee", "email": "not-an-email", "message": "hi" }))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["details"]["field"], "email");
}

#[tokio::test]
async fn test_media_upload_edit_search_and_delete() {
    let server = create_test_server().await;
    let token = sign_in(&server).await;

    let form = MultipartForm::new()
        .add_text("note", "ignored")
        .add_part(
            "files",
            Part::bytes(b"%PDF-1.7 brochure".to_vec())
                .file_name("HB-500 Brochure.pdf")
                .mime_type("application/pdf"),
        )
        .add_part(
            "files",
            Part::bytes(vec![0u8; 1024 * 1024 + 1]).file_name("huge.mp4").mime_type("video/mp4"),
        )
        .add_part(
            "files",
            Part::bytes(b"id,model\n1,HB-300\n".to_vec())
                .file_name("models.csv")
                .mime_type("text/csv"),
        );

    let response =
        server.post("/dashboard/media").authorization_bearer(&token).multipart(form).await;
    response.assert_status_ok();
    let report: UploadResponse = response.json();
    assert_eq!(report.uploaded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].original_filename, "huge.mp4");

    let brochure = &report.uploaded[0];
    assert!(brochure.file_path.starts_with("uploads/"));
    assert!(brochure.filename.ends_with(".pdf"));
    assert_eq!(brochure.url, format!("https://cdn.ironbale.example/media/{}", brochure.file_path));
    assert_eq!(brochure.uploaded_by, OPERATOR);

    let edited: MediaItem = server
        .patch(&format!("/dashboard/media/{}", brochure.id))
        .authorization_bearer(&token)
        .json(&json!({ "alt_text": "Horizontal baler brochure", "tags": ["Sales", "sales", "print"] }))
        .await
        .json();
    assert_eq!(edited.tags, vec!["Sales".to_string(), "print".to_string()]);

    let found: MediaListResponse = server
        .get("/dashboard/media")
        .add_query_param("search", "BALER")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(found.total, 1);
    assert_eq!(found.items[0].id, brochure.id);

    let docs: MediaListResponse = server
        .get("/dashboard/media")
        .add_query_param("category", "document")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(docs.total, 2);

    let used: MediaItem = server
        .post(&format!("/dashboard/media/{}/usage", brochure.id))
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(used.usage_count, 1);

    let stats: MediaStatsResponse =
        server.get("/dashboard/media/stats").authorization_bearer(&token).await.json();
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.by_category.get("document"), Some(&2));

    server
        .delete(&format!("/dashboard/media/{}", brochure.id))
        .authorization_bearer(&token)
        .await
        .assert_status_ok();
    server
        .delete(&format!("/dashboard/media/{}", brochure.id))
        .authorization_bearer(&token)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_openapi_documentation() {
    let server = create_test_server().await;
    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let doc: Value = response.json();
    assert!(doc["paths"]["/calculators/{name}"]["post"].is_object());
    assert!(doc["paths"]["/dashboard/media"]["post"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
}
