use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the `media` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: Uuid,
    /// Generated name the object is stored under
    pub filename: String,
    /// Name of the file as uploaded
    pub original_filename: String,
    pub file_size: u64,
    pub mime_type: String,
    /// Object path inside the bucket
    pub file_path: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub uploaded_by: String,
    pub usage_count: u32,
    pub tags: Vec<String>,
}

impl MediaRecord {
    pub fn category(&self) -> FileCategory {
        FileCategory::from_mime(&self.mime_type)
    }

    /// Applies a metadata edit. Blank text clears a field.
    pub fn apply(&mut self, update: MediaUpdate) {
        if let Some(alt_text) = update.alt_text {
            self.alt_text = non_blank(alt_text);
        }
        if let Some(caption) = update.caption {
            self.caption = non_blank(caption);
        }
        if let Some(tags) = update.tags {
            self.tags = normalize_tags(tags);
        }
    }
}

/// Coarse file-type grouping used by the dashboard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Document,
    Other,
}

impl FileCategory {
    pub fn from_mime(mime_type: &str) -> Self {
        let mime = mime_type.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            FileCategory::Image
        } else if mime.starts_with("video/") {
            FileCategory::Video
        } else if mime.starts_with("audio/") {
            FileCategory::Audio
        } else if mime.starts_with("text/")
            || mime == "application/pdf"
            || mime == "application/msword"
            || mime.contains("officedocument")
        {
            FileCategory::Document
        } else {
            FileCategory::Other
        }
    }
}

/// Editable metadata of a media record; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaUpdate {
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trimmed, non-empty, first occurrence wins.
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !normalized.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            normalized.push(tag.to_string());
        }
    }
    normalized
}
