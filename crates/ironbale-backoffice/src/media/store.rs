use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::record::MediaRecord;
use crate::error::{BackofficeError, BackofficeResult};

const MEDIA_TABLE: &str = "media";

/// Row access to the hosted `media` table.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Every row, newest first.
    async fn select_all(&self) -> BackofficeResult<Vec<MediaRecord>>;

    async fn get(&self, id: Uuid) -> BackofficeResult<MediaRecord>;

    async fn insert(&self, record: MediaRecord) -> BackofficeResult<MediaRecord>;

    /// Replaces an existing row.
    async fn update(&self, record: MediaRecord) -> BackofficeResult<MediaRecord>;

    /// Removes a row and returns it.
    async fn delete(&self, id: Uuid) -> BackofficeResult<MediaRecord>;
}

/// Binary storage bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> BackofficeResult<()>;

    async fn remove(&self, path: &str) -> BackofficeResult<()>;

    /// URL the site serves the object from.
    fn public_url(&self, path: &str) -> String;
}

#[derive(Debug, Default)]
pub struct InMemoryMediaRepository {
    rows: DashMap<Uuid, MediaRecord>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn select_all(&self) -> BackofficeResult<Vec<MediaRecord>> {
        let mut rows: Vec<MediaRecord> =
            self.rows.iter().map(|entry| entry.value().clone()).collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> BackofficeResult<MediaRecord> {
        self.rows
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| BackofficeError::not_found(MEDIA_TABLE, id))
    }

    async fn insert(&self, record: MediaRecord) -> BackofficeResult<MediaRecord> {
        if self.rows.contains_key(&record.id) {
            return Err(BackofficeError::database(
                MEDIA_TABLE,
                format!("duplicate key value violates unique constraint: id={}", record.id),
            ));
        }
        self.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: MediaRecord) -> BackofficeResult<MediaRecord> {
        match self.rows.get_mut(&record.id) {
            Some(mut row) => {
                *row = record.clone();
                Ok(record)
            }
            None => Err(BackofficeError::not_found(MEDIA_TABLE, record.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> BackofficeResult<MediaRecord> {
        self.rows
            .remove(&id)
            .map(|(_, record)| record)
            .ok_or_else(|| BackofficeError::not_found(MEDIA_TABLE, id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Bucket kept in memory; URLs are built from a configured public base.
#[derive(Debug)]
pub struct InMemoryObjectStorage {
    bucket: String,
    public_base_url: String,
    objects: DashMap<String, StoredObject>,
}

impl InMemoryObjectStorage {
    pub fn new(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            objects: DashMap::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.get(path).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> BackofficeResult<()> {
        if self.objects.contains_key(path) {
            return Err(BackofficeError::storage(path, "object already exists"));
        }
        self.objects
            .insert(path.to_string(), StoredObject { bytes, content_type: content_type.to_string() });
        Ok(())
    }

    async fn remove(&self, path: &str) -> BackofficeResult<()> {
        self.objects
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| BackofficeError::storage(path, "object not found"))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, path.trim_start_matches('/'))
    }
}
