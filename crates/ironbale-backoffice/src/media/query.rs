use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::record::{FileCategory, MediaRecord};

/// Dashboard filter: free-text search plus an optional file-type category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaQuery {
    pub search: Option<String>,
    pub category: Option<FileCategory>,
}

impl MediaQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self { search: Some(term.into()), category: None }
    }

    pub fn category(category: FileCategory) -> Self {
        Self { search: None, category: Some(category) }
    }

    /// Search is case-insensitive over the stored and original filenames, alt
    /// text and tags.
    pub fn matches(&self, record: &MediaRecord) -> bool {
        if let Some(category) = self.category {
            if record.category() != category {
                return false;
            }
        }

        let needle = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => term.to_lowercase(),
            _ => return true,
        };

        record.filename.to_lowercase().contains(&needle)
            || record.original_filename.to_lowercase().contains(&needle)
            || record
                .alt_text
                .as_deref()
                .is_some_and(|alt| alt.to_lowercase().contains(&needle))
            || record.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Keeps matching records, newest first.
    pub fn apply(&self, records: Vec<MediaRecord>) -> Vec<MediaRecord> {
        let mut matched: Vec<MediaRecord> =
            records.into_iter().filter(|record| self.matches(record)).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaStats {
    pub total_files: usize,
    pub total_bytes: u64,
    pub by_category: BTreeMap<FileCategory, usize>,
}

impl MediaStats {
    pub fn from_records(records: &[MediaRecord]) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total_files += 1;
            stats.total_bytes += record.file_size;
            *stats.by_category.entry(record.category()).or_insert(0) += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn record(filename: &str, mime: &str, alt: Option<&str>, tags: &[&str]) -> MediaRecord {
        MediaRecord {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            original_filename: filename.to_string(),
            file_size: 100,
            mime_type: mime.to_string(),
            file_path: format!("uploads/{filename}"),
            alt_text: alt.map(str::to_string),
            caption: None,
            width: None,
            height: None,
            created_at: Utc::now(),
            uploaded_by: "ops@ironbale.example".to_string(),
            usage_count: 0,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let by_name = record("HB-500-Front.jpg", "image/jpeg", None, &[]);
        let by_alt = record("a.jpg", "image/jpeg", Some("Twin-shaft SHREDDER"), &[]);
        let by_tag = record("b.pdf", "application/pdf", None, &["Brochure", "Balers"]);
        let miss = record("c.mp4", "video/mp4", Some("factory tour"), &["video"]);

        let query = MediaQuery::search("hb-500");
        assert!(query.matches(&by_name));
        assert!(!query.matches(&miss));

        assert!(MediaQuery::search("shredder").matches(&by_alt));
        assert!(MediaQuery::search("BALERS").matches(&by_tag));
        assert!(!MediaQuery::search("shredder").matches(&by_tag));
    }

    #[test]
    fn original_name_is_searched_but_caption_is_not() {
        let mut media = record("1718000000000-3f2a9c1e.pdf", "application/pdf", None, &[]);
        media.original_filename = "HB-500 Brochure.pdf".into();
        media.caption = Some("vertical baler".into());
        assert!(MediaQuery::search("brochure").matches(&media));
        assert!(!MediaQuery::search("vertical").matches(&media));
    }

    #[test]
    fn blank_search_matches_everything() {
        let media = record("x.png", "image/png", None, &[]);
        assert!(MediaQuery::search("   ").matches(&media));
        assert!(MediaQuery::default().matches(&media));
    }

    #[test]
    fn category_filter_combines_with_search() {
        let image = record("baler.png", "image/png", None, &[]);
        let doc = record("baler.pdf", "application/pdf", None, &[]);
        let query =
            MediaQuery { search: Some("baler".into()), category: Some(FileCategory::Document) };
        assert!(!query.matches(&image));
        assert!(query.matches(&doc));
    }

    #[test]
    fn apply_orders_newest_first() {
        let mut older = record("old.png", "image/png", None, &[]);
        older.created_at = Utc::now() - Duration::days(2);
        let newer = record("new.png", "image/png", None, &[]);

        let listed = MediaQuery::default().apply(vec![older.clone(), newer.clone()]);
        assert_eq!(listed, vec![newer, older]);
    }

    #[test]
    fn stats_by_category() {
        let records = vec![
            record("a.png", "image/png", None, &[]),
            record("b.png", "image/png", None, &[]),
            record("c.pdf", "application/pdf", None, &[]),
        ];
        let stats = MediaStats::from_records(&records);
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_bytes, 300);
        assert_eq!(stats.by_category[&FileCategory::Image], 2);
        assert_eq!(stats.by_category[&FileCategory::Document], 1);
        assert!(!stats.by_category.contains_key(&FileCategory::Video));
    }
}
