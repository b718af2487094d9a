use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::query::{MediaQuery, MediaStats};
use super::record::{FileCategory, MediaRecord, MediaUpdate};
use super::store::{MediaRepository, ObjectStorage};
use crate::error::{BackofficeError, BackofficeResult};
use crate::session::Session;

const UPLOAD_PREFIX: &str = "uploads";

/// A file received from the dashboard upload form.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub original_filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadFailure {
    pub original_filename: String,
    pub reason: String,
}

/// Outcome of a batch upload. Files are independent; one failing does not
/// stop the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadReport {
    pub uploaded: Vec<MediaRecord>,
    pub failed: Vec<UploadFailure>,
}

pub struct MediaLibrary {
    repository: Arc<dyn MediaRepository>,
    storage: Arc<dyn ObjectStorage>,
    max_file_size: u64,
}

impl MediaLibrary {
    pub fn new(
        repository: Arc<dyn MediaRepository>,
        storage: Arc<dyn ObjectStorage>,
        max_file_size: u64,
    ) -> Self {
        Self { repository, storage, max_file_size }
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub async fn list(&self, query: &MediaQuery) -> BackofficeResult<Vec<MediaRecord>> {
        let records = self.repository.select_all().await?;
        Ok(query.apply(records))
    }

    pub async fn get(&self, id: Uuid) -> BackofficeResult<MediaRecord> {
        self.repository.get(id).await
    }

    pub async fn stats(&self) -> BackofficeResult<MediaStats> {
        let records = self.repository.select_all().await?;
        Ok(MediaStats::from_records(&records))
    }

    pub fn public_url(&self, record: &MediaRecord) -> String {
        self.storage.public_url(&record.file_path)
    }

    pub async fn upload(&self, session: &Session, files: Vec<UploadFile>) -> UploadReport {
        let mut report = UploadReport::default();
        for file in files {
            let original_filename = file.original_filename.clone();
            match self.upload_one(session, file).await {
                Ok(record) => {
                    info!(
                        user = %session.user_email,
                        media_id = %record.id,
                        path = %record.file_path,
                        bytes = record.file_size,
                        "Media uploaded"
                    );
                    report.uploaded.push(record);
                }
                Err(err) => {
                    error!(
                        user = %session.user_email,
                        file = %original_filename,
                        error = %err,
                        "Media upload failed"
                    );
                    report
                        .failed
                        .push(UploadFailure { original_filename, reason: err.to_string() });
                }
            }
        }
        report
    }

    async fn upload_one(&self, session: &Session, file: UploadFile) -> BackofficeResult<MediaRecord> {
        let file_size = file.bytes.len() as u64;
        if file_size == 0 {
            return Err(BackofficeError::validation("file", "file is empty"));
        }
        if file_size > self.max_file_size {
            return Err(BackofficeError::validation(
                "file",
                format!("file is {file_size} bytes, limit is {}", self.max_file_size),
            ));
        }

        let filename = stored_filename(&file.original_filename, &file.mime_type);
        let file_path = format!("{UPLOAD_PREFIX}/{filename}");
        let (width, height) = match FileCategory::from_mime(&file.mime_type) {
            FileCategory::Image => probe_dimensions(&file.bytes, &file.original_filename),
            _ => (None, None),
        };

        let record = MediaRecord {
            id: Uuid::new_v4(),
            filename,
            original_filename: file.original_filename,
            file_size,
            mime_type: file.mime_type,
            file_path,
            alt_text: None,
            caption: None,
            width,
            height,
            created_at: Utc::now(),
            uploaded_by: session.user_email.clone(),
            usage_count: 0,
            tags: Vec::new(),
        };

        self.storage.put(&record.file_path, file.bytes, &record.mime_type).await?;

        match self.repository.insert(record.clone()).await {
            Ok(inserted) => Ok(inserted),
            Err(err) => {
                // Drop the orphaned object so storage matches the table
                if let Err(cleanup) = self.storage.remove(&record.file_path).await {
                    warn!(path = %record.file_path, error = %cleanup, "Orphaned media object left in storage");
                }
                Err(err)
            }
        }
    }

    pub async fn update_metadata(
        &self,
        session: &Session,
        id: Uuid,
        update: MediaUpdate,
    ) -> BackofficeResult<MediaRecord> {
        let mut record = self.repository.get(id).await?;
        record.apply(update);
        let record = self.repository.update(record).await?;
        info!(user = %session.user_email, media_id = %id, "Media metadata updated");
        Ok(record)
    }

    /// Counts one more page referencing the file.
    pub async fn record_usage(&self, id: Uuid) -> BackofficeResult<MediaRecord> {
        let mut record = self.repository.get(id).await?;
        record.usage_count = record.usage_count.saturating_add(1);
        self.repository.update(record).await
    }

    /// Removes the row, then the object. A failed object removal is logged
    /// and the deletion still counts.
    pub async fn delete(&self, session: &Session, id: Uuid) -> BackofficeResult<MediaRecord> {
        let record = self.repository.delete(id).await?;
        if let Err(err) = self.storage.remove(&record.file_path).await {
            error!(path = %record.file_path, error = %err, "Failed to remove media object");
        }
        info!(user = %session.user_email, media_id = %id, path = %record.file_path, "Media deleted");
        Ok(record)
    }
}

/// `<unix-millis>-<8 hex>.<ext>`
fn stored_filename(original_filename: &str, mime_type: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{millis}-{}.{}", &nonce[..8], extension(original_filename, mime_type))
}

fn extension(original_filename: &str, mime_type: &str) -> String {
    let from_name = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    if let Some(ext) = from_name {
        return ext.to_ascii_lowercase();
    }

    match mime_type.split_once('/').map(|(_, subtype)| subtype) {
        Some("jpeg") => "jpg".to_string(),
        Some(subtype) if !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_alphanumeric()) => {
            subtype.to_ascii_lowercase()
        }
        _ => "bin".to_string(),
    }
}

fn probe_dimensions(bytes: &[u8], original_filename: &str) -> (Option<u32>, Option<u32>) {
    let probed = image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.into_dimensions());
    match probed {
        Ok((width, height)) => (Some(width), Some(height)),
        Err(err) => {
            warn!(file = %original_filename, error = %err, "Could not read image dimensions");
            (None, None)
        }
    }
}
