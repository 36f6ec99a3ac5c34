use crate::errors::Result;
use crate::search::search_model::SearchDocument;
use async_trait::async_trait;

/// Trait for the search index store.
#[async_trait]
pub trait SearchRepositoryTrait: Send + Sync {
    async fn upsert(&self, document: SearchDocument) -> Result<()>;
    async fn remove(&self, doc_id: &str) -> Result<usize>;
    /// Case-insensitive substring match over one user's documents.
    fn query(&self, user_id: &str, query: &str, limit: i64) -> Result<Vec<SearchDocument>>;
}
