use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::Inquiry;
use crate::error::{BackofficeError, BackofficeResult};

const INQUIRY_TABLE: &str = "inquiries";

/// Row access to the hosted `inquiries` table.
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn insert(&self, inquiry: Inquiry) -> BackofficeResult<Inquiry>;

    async fn get(&self, id: Uuid) -> BackofficeResult<Inquiry>;

    async fn select_all(&self) -> BackofficeResult<Vec<Inquiry>>;

    async fn update(&self, inquiry: Inquiry) -> BackofficeResult<Inquiry>;
}

#[derive(Debug, Default)]
pub struct InMemoryInquiryRepository {
    rows: DashMap<Uuid, Inquiry>,
}

impl InMemoryInquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn insert(&self, inquiry: Inquiry) -> BackofficeResult<Inquiry> {
        if self.rows.contains_key(&inquiry.id) {
            return Err(BackofficeError::database(
                INQUIRY_TABLE,
                format!("duplicate key value violates unique constraint: id={}", inquiry.id),
            ));
        }
        self.rows.insert(inquiry.id, inquiry.clone());
        Ok(inquiry)
    }

    async fn get(&self, id: Uuid) -> BackofficeResult<Inquiry> {
        self.rows
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| BackofficeError::not_found("inquiry", id))
    }

    async fn select_all(&self) -> BackofficeResult<Vec<Inquiry>> {
        Ok(self.rows.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn update(&self, inquiry: Inquiry) -> BackofficeResult<Inquiry> {
        match self.rows.get_mut(&inquiry.id) {
            Some(mut row) => {
                *row = inquiry.clone();
                Ok(inquiry)
            }
            None => Err(BackofficeError::not_found("inquiry", inquiry.id)),
        }
    }
}
