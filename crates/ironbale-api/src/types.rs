//! Request and response bodies of the Ironbale API, documented through utoipa.

use chrono::{DateTime, Utc};
use ironbale_backoffice::{
    FileCategory, Inquiry, InquiryStatus, MediaRecord, MediaStats, MediaUpdate, NewInquiry,
    Session, UploadFailure,
};
use ironbale_calculator::{CalculatorInfo, Estimate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
    pub uptime_seconds: u64,
    pub calculators: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculatorSummary {
    #[schema(example = "baler_sizing")]
    pub name: String,
    pub description: String,
}

impl From<CalculatorInfo> for CalculatorSummary {
    fn from(info: CalculatorInfo) -> Self {
        Self { name: info.name, description: info.description }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculatorListResponse {
    pub calculators: Vec<CalculatorSummary>,
}

/// Coerced inputs and the derived figures of one calculator run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculationResponse {
    #[schema(example = "roi")]
    pub calculator: String,
    #[schema(value_type = Object)]
    pub inputs: Value,
    #[schema(value_type = Object)]
    pub result: Value,
}

impl From<Estimate> for CalculationResponse {
    fn from(estimate: Estimate) -> Self {
        Self { calculator: estimate.calculator, inputs: estimate.inputs, result: estimate.result }
    }
}

/// Contact details shared by the contact form and quote requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ContactDetails {
    #[schema(example = "Dana Ortiz")]
    pub name: String,
    #[schema(example = "dana@recycler.example")]
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ContactDetails {
    pub fn into_inquiry(self, source: Option<String>, estimate: Option<Value>) -> NewInquiry {
        NewInquiry {
            name: self.name,
            email: self.email,
            company: self.company,
            phone: self.phone,
            message: self.message,
            source,
            estimate,
        }
    }
}

/// "Get Quote" from a calculator: the form fields are run again server side
/// and attached to the inquiry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteRequest {
    #[schema(example = "baler_sizing")]
    pub calculator: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub inquiry: InquiryView,
    pub estimate: CalculationResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    #[schema(example = "calculator:roi")]
    pub source: String,
    #[schema(value_type = String, example = "new")]
    pub status: InquiryStatus,
    #[schema(value_type = Object)]
    pub estimate: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Inquiry> for InquiryView {
    fn from(inquiry: Inquiry) -> Self {
        Self {
            id: inquiry.id,
            name: inquiry.name,
            email: inquiry.email,
            company: inquiry.company,
            phone: inquiry.phone,
            message: inquiry.message,
            source: inquiry.source,
            status: inquiry.status,
            estimate: inquiry.estimate,
            created_at: inquiry.created_at,
            updated_at: inquiry.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryListResponse {
    pub items: Vec<InquiryView>,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryListQuery {
    pub status: Option<InquiryStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryStatusUpdate {
    #[schema(value_type = String, example = "contacted")]
    pub status: InquiryStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "sales@ironbale.example")]
    pub email: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    /// Send back as `Authorization: Bearer <token>`
    pub token: String,
    pub user_email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user_email: session.user_email,
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaItem {
    pub id: Uuid,
    pub filename: String,
    pub original_filename: String,
    pub file_size: u64,
    pub mime_type: String,
    pub file_path: String,
    /// Public URL of the stored object
    pub url: String,
    #[schema(value_type = String, example = "image")]
    pub category: FileCategory,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub uploaded_by: String,
    pub usage_count: u32,
    pub tags: Vec<String>,
}

impl MediaItem {
    pub fn new(record: MediaRecord, url: String) -> Self {
        Self {
            category: record.category(),
            id: record.id,
            filename: record.filename,
            original_filename: record.original_filename,
            file_size: record.file_size,
            mime_type: record.mime_type,
            file_path: record.file_path,
            url,
            alt_text: record.alt_text,
            caption: record.caption,
            width: record.width,
            height: record.height,
            created_at: record.created_at,
            uploaded_by: record.uploaded_by,
            usage_count: record.usage_count,
            tags: record.tags,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaListQuery {
    pub search: Option<String>,
    pub category: Option<FileCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaListResponse {
    pub items: Vec<MediaItem>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadFailureView {
    pub original_filename: String,
    pub reason: String,
}

impl From<UploadFailure> for UploadFailureView {
    fn from(failure: UploadFailure) -> Self {
        Self { original_filename: failure.original_filename, reason: failure.reason }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub uploaded: Vec<MediaItem>,
    pub failed: Vec<UploadFailureView>,
}

/// Omitted fields are left as they are; an empty string clears a text field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MediaUpdateRequest {
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<MediaUpdateRequest> for MediaUpdate {
    fn from(request: MediaUpdateRequest) -> Self {
        MediaUpdate { alt_text: request.alt_text, caption: request.caption, tags: request.tags }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaStatsResponse {
    pub total_files: usize,
    pub total_bytes: u64,
    #[schema(example = json!({ "image": 12, "document": 3 }))]
    pub by_category: BTreeMap<String, usize>,
}

impl From<MediaStats> for MediaStatsResponse {
    fn from(stats: MediaStats) -> Self {
        let by_category = stats
            .by_category
            .into_iter()
            .filter_map(|(category, count)| {
                serde_json::to_value(category)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .map(|name| (name, count))
            })
            .collect();
        Self { total_files: stats.total_files, total_bytes: stats.total_bytes, by_category }
    }
}
