//! Wire types for the search endpoint and the validated domain item.
//!
//! ```text
//! {"results": [ RawRecord, ... ]}
//!                  │
//!                  ▼  TryFrom (rejects records without a key)
//!            SearchResultItem
//! ```

use serde::Deserialize;
use std::fmt;

/// Top-level response body. Entries are kept as raw JSON so that one bad
/// record does not fail the whole response.
#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    pub results: Vec<serde_json::Value>,
}

/// One result object as the service sends it. Every field is optional here;
/// validation happens in the `TryFrom` into [`SearchResultItem`].
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub key: Option<String>,
    pub size: Option<u64>,
    pub uploaded: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub author_name: Option<String>,
}

/// A validated search hit. `key` is the only field the list needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultItem {
    pub key: String,
    pub size: Option<u64>,
    pub uploaded: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub author_name: Option<String>,
}

/// Why a raw record was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    MissingKey,
    Malformed(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::MissingKey => write!(f, "record has no key"),
            RecordError::Malformed(msg) => write!(f, "malformed record: {msg}"),
        }
    }
}

impl std::error::Error for RecordError {}

impl SearchResultItem {
    /// Builds an item with only a key set.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: None,
            uploaded: None,
            url: None,
            title: None,
            author_name: None,
        }
    }

    /// Identity of this item as row `index` of a rendered list.
    /// Unique within one render even when keys repeat.
    pub fn row_id(&self, index: usize) -> String {
        format!("{}_{}", self.key, index)
    }
}

impl TryFrom<RawRecord> for SearchResultItem {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let key = raw
            .key
            .filter(|k| !k.is_empty())
            .ok_or(RecordError::MissingKey)?;
        Ok(Self {
            key,
            size: raw.size,
            uploaded: raw.uploaded,
            url: raw.url,
            title: raw.title,
            author_name: raw.author_name,
        })
    }
}

impl TryFrom<serde_json::Value> for SearchResultItem {
    type Error = RecordError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let raw: RawRecord =
            serde_json::from_value(value).map_err(|e| RecordError::Malformed(e.to_string()))?;
        raw.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_with_key_only() {
        let item = SearchResultItem::try_from(json!({"key": "a"})).unwrap();
        assert_eq!(item, SearchResultItem::with_key("a"));
    }

    #[test]
    fn test_record_keeps_optional_fields() {
        let item = SearchResultItem::try_from(json!({
            "key": "report.pdf",
            "size": 2048,
            "uploaded": "2024-05-01T10:00:00Z",
            "url": "https://files.example/report.pdf",
            "title": "Report",
            "author_name": "Ada",
            "etag": "ignored"
        }))
        .unwrap();
        assert_eq!(item.key, "report.pdf");
        assert_eq!(item.size, Some(2048));
        assert_eq!(item.uploaded.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(item.url.as_deref(), Some("https://files.example/report.pdf"));
        assert_eq!(item.title.as_deref(), Some("Report"));
        assert_eq!(item.author_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_record_without_key_is_rejected() {
        let err = SearchResultItem::try_from(json!({"title": "orphan"})).unwrap_err();
        assert_eq!(err, RecordError::MissingKey);
    }

    #[test]
    fn test_record_with_empty_key_is_rejected() {
        let err = SearchResultItem::try_from(json!({"key": ""})).unwrap_err();
        assert_eq!(err, RecordError::MissingKey);
    }

    #[test]
    fn test_record_with_wrong_key_type_is_malformed() {
        let err = SearchResultItem::try_from(json!({"key": 42})).unwrap_err();
        assert!(matches!(err, RecordError::Malformed(_)));
    }

    #[test]
    fn test_non_object_record_is_malformed() {
        let err = SearchResultItem::try_from(json!("just a string")).unwrap_err();
        assert!(matches!(err, RecordError::Malformed(_)));
    }

    #[test]
    fn test_row_id_disambiguates_duplicate_keys() {
        let a = SearchResultItem::with_key("dup");
        let b = SearchResultItem::with_key("dup");
        assert_eq!(a.row_id(0), "dup_0");
        assert_ne!(a.row_id(0), b.row_id(1));
    }

    #[test]
    fn test_response_requires_results_field() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"items": []}"#).is_err());
        let parsed: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(parsed.results.is_empty());
    }
}
