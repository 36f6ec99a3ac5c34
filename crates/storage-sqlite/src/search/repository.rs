use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use fitfolio_core::search::{SearchDocument, SearchRepositoryTrait};
use fitfolio_core::Result;

use super::model::SearchDocumentDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::search_documents;

pub struct SearchRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SearchRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SearchRepository { pool, writer }
    }
}

#[async_trait]
impl SearchRepositoryTrait for SearchRepository {
    async fn upsert(&self, document: SearchDocument) -> Result<()> {
        let document_db = SearchDocumentDB::from(document);
        self.writer
            .exec(move |conn| -> Result<()> {
                diesel::insert_into(search_documents::table)
                    .values(&document_db)
                    .on_conflict(search_documents::doc_id)
                    .do_update()
                    .set(&document_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn remove(&self, doc_id: &str) -> Result<usize> {
        let doc_id = doc_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                Ok(diesel::delete(search_documents::table.find(&doc_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn query(&self, user_id: &str, query: &str, limit: i64) -> Result<Vec<SearchDocument>> {
        let mut conn = get_connection(&self.pool)?;
        // SQLite LIKE is case-insensitive for ASCII.
        let pattern = format!("%{}%", query);
        let rows = search_documents::table
            .filter(search_documents::user_id.eq(user_id))
            .filter(
                search_documents::title
                    .like(pattern.clone())
                    .or(search_documents::body.like(pattern)),
            )
            .order(search_documents::updated_at.desc())
            .limit(limit)
            .load::<SearchDocumentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(SearchDocument::from).collect())
    }
}
