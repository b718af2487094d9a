//! Inquiries from the contact form and calculator quote requests.

mod store;

pub use store::{InMemoryInquiryRepository, InquiryRepository};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{BackofficeError, BackofficeResult};
use crate::session::Session;

pub const MAX_MESSAGE_CHARS: usize = 5000;
pub const CONTACT_FORM_SOURCE: &str = "contact_form";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    Closed,
}

/// Inquiry as submitted from the public site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
    /// `contact_form` or `calculator:<name>`
    #[serde(default)]
    pub source: Option<String>,
    /// Calculator inputs and result attached to a quote request
    #[serde(default)]
    pub estimate: Option<Value>,
}

impl NewInquiry {
    pub fn validate(&self) -> BackofficeResult<()> {
        if self.name.trim().is_empty() {
            return Err(BackofficeError::validation("name", "name is required"));
        }
        if !self.email.contains('@') {
            return Err(BackofficeError::validation("email", "email must contain '@'"));
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(BackofficeError::validation(
                "message",
                format!("message exceeds {MAX_MESSAGE_CHARS} characters"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,
    pub source: String,
    pub status: InquiryStatus,
    pub estimate: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn optional(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

pub struct InquiryDesk {
    repository: Arc<dyn InquiryRepository>,
}

impl InquiryDesk {
    pub fn new(repository: Arc<dyn InquiryRepository>) -> Self {
        Self { repository }
    }

    /// Validates and stores a public submission; no session required.
    pub async fn submit(&self, new: NewInquiry) -> BackofficeResult<Inquiry> {
        new.validate()?;
        let now = Utc::now();
        let inquiry = Inquiry {
            id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            email: new.email.trim().to_lowercase(),
            company: optional(new.company),
            phone: optional(new.phone),
            message: new.message.trim().to_string(),
            source: optional(new.source).unwrap_or_else(|| CONTACT_FORM_SOURCE.to_string()),
            status: InquiryStatus::New,
            estimate: new.estimate,
            created_at: now,
            updated_at: now,
        };
        let inquiry = self.repository.insert(inquiry).await?;
        info!(inquiry_id = %inquiry.id, source = %inquiry.source, "Inquiry received");
        Ok(inquiry)
    }

    /// Newest first, optionally narrowed to one status.
    pub async fn list(&self, status: Option<InquiryStatus>) -> BackofficeResult<Vec<Inquiry>> {
        let mut inquiries: Vec<Inquiry> = self
            .repository
            .select_all()
            .await?
            .into_iter()
            .filter(|inquiry| status.is_none_or(|s| inquiry.status == s))
            .collect();
        inquiries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(inquiries)
    }

    pub async fn get(&self, id: Uuid) -> BackofficeResult<Inquiry> {
        self.repository.get(id).await
    }

    pub async fn update_status(
        &self,
        session: &Session,
        id: Uuid,
        status: InquiryStatus,
    ) -> BackofficeResult<Inquiry> {
        let mut inquiry = self.repository.get(id).await?;
        let previous = inquiry.status;
        inquiry.status = status;
        inquiry.updated_at = Utc::now();
        let inquiry = self.repository.update(inquiry).await?;
        info!(
            user = %session.user_email,
            inquiry_id = %id,
            from = ?previous,
            to = ?status,
            "Inquiry status changed"
        );
        Ok(inquiry)
    }
}
