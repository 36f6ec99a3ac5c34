//! Search domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Kind of record behind a search document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDocKind {
    Goal,
    Measurement,
}

impl SearchDocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDocKind::Goal => "goal",
            SearchDocKind::Measurement => "measurement",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "goal" => Some(SearchDocKind::Goal),
            "measurement" => Some(SearchDocKind::Measurement),
            _ => None,
        }
    }
}

/// A flattened, queryable rendition of a domain record.
///
/// `doc_id` equals the source record's id, so re-indexing is an upsert and
/// deletion needs no lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    pub doc_id: String,
    pub user_id: String,
    pub kind: SearchDocKind,
    pub title: String,
    pub body: String,
    pub updated_at: NaiveDateTime,
}
