use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::goals::Goal;
use crate::measurements::Measurement;

use super::search_model::{SearchDocKind, SearchDocument};
use super::search_traits::SearchRepositoryTrait;

pub struct SearchService {
    repository: Arc<dyn SearchRepositoryTrait>,
}

/// Trait for search operations exposed to the API layer.
#[async_trait]
pub trait SearchServiceTrait: Send + Sync {
    fn search(&self, user_id: &str, query: &str, limit: i64) -> Result<Vec<SearchDocument>>;
    async fn index_goal(&self, goal: &Goal) -> Result<()>;
    async fn index_measurement(&self, measurement: &Measurement) -> Result<()>;
    async fn remove_document(&self, doc_id: &str) -> Result<()>;
}

impl SearchService {
    pub fn new(repository: Arc<dyn SearchRepositoryTrait>) -> Self {
        SearchService { repository }
    }
}

fn render_goal(goal: &Goal) -> SearchDocument {
    let mut body = vec![goal.kind.as_str().to_string(), goal.status.as_str().to_string()];
    if let Some(description) = &goal.description {
        body.push(description.clone());
    }
    SearchDocument {
        doc_id: goal.id.clone(),
        user_id: goal.user_id.clone(),
        kind: SearchDocKind::Goal,
        title: goal.title.clone(),
        body: body.join(" "),
        updated_at: goal.updated_at,
    }
}

fn render_measurement(measurement: &Measurement) -> SearchDocument {
    let mut body = Vec::new();
    for (label, value) in [
        ("weight", measurement.weight),
        ("height", measurement.height),
        ("body fat", measurement.body_fat),
        ("chest", measurement.chest),
        ("waist", measurement.waist),
        ("hips", measurement.hips),
    ] {
        if let Some(v) = value {
            body.push(format!("{} {}", label, v));
        }
    }
    if let Some(notes) = &measurement.notes {
        body.push(notes.clone());
    }
    SearchDocument {
        doc_id: measurement.id.clone(),
        user_id: measurement.user_id.clone(),
        kind: SearchDocKind::Measurement,
        title: format!("Measurement {}", measurement.recorded_at.date()),
        body: body.join(" "),
        updated_at: measurement.updated_at,
    }
}

#[async_trait]
impl SearchServiceTrait for SearchService {
    fn search(&self, user_id: &str, query: &str, limit: i64) -> Result<Vec<SearchDocument>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.query(user_id, trimmed, limit)
    }

    async fn index_goal(&self, goal: &Goal) -> Result<()> {
        self.repository.upsert(render_goal(goal)).await
    }

    async fn index_measurement(&self, measurement: &Measurement) -> Result<()> {
        self.repository.upsert(render_measurement(measurement)).await
    }

    async fn remove_document(&self, doc_id: &str) -> Result<()> {
        self.repository.remove(doc_id).await.map(|_| ())
    }
}
