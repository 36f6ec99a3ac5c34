//! Database models for search documents.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use fitfolio_core::search::{SearchDocKind, SearchDocument};

/// Database model for search documents.
#[derive(
    Insertable, Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::search_documents)]
#[diesel(primary_key(doc_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SearchDocumentDB {
    pub doc_id: String,
    pub user_id: String,
    pub doc_type: String,
    pub title: String,
    pub body: String,
    pub updated_at: NaiveDateTime,
}

impl From<SearchDocumentDB> for SearchDocument {
    fn from(db: SearchDocumentDB) -> Self {
        Self {
            doc_id: db.doc_id,
            user_id: db.user_id,
            kind: SearchDocKind::parse(&db.doc_type).unwrap_or(SearchDocKind::Goal),
            title: db.title,
            body: db.body,
            updated_at: db.updated_at,
        }
    }
}

impl From<SearchDocument> for SearchDocumentDB {
    fn from(domain: SearchDocument) -> Self {
        Self {
            doc_id: domain.doc_id,
            user_id: domain.user_id,
            doc_type: domain.kind.as_str().to_string(),
            title: domain.title,
            body: domain.body,
            updated_at: domain.updated_at,
        }
    }
}
