use std::sync::Arc;

use tokio::sync::mpsc;

use fitfolio_core::events::DomainEvent;
use fitfolio_core::goals::GoalRepositoryTrait;
use fitfolio_core::measurements::MeasurementRepositoryTrait;
use fitfolio_core::search::SearchServiceTrait;
use fitfolio_core::Result;

/// Dependencies needed by the search index worker.
///
/// The worker reads through the repositories rather than taking record
/// payloads off the events, so it always indexes the latest persisted state.
pub struct SearchIndexDeps {
    pub goal_repository: Arc<dyn GoalRepositoryTrait>,
    pub measurement_repository: Arc<dyn MeasurementRepositoryTrait>,
    pub search_service: Arc<dyn SearchServiceTrait>,
}

/// Runs the search index worker until the event channel closes.
pub async fn search_index_worker(
    mut rx: mpsc::UnboundedReceiver<DomainEvent>,
    deps: SearchIndexDeps,
) {
    tracing::info!("Search index worker started");
    while let Some(event) = rx.recv().await {
        if let Err(err) = handle_event(&event, &deps).await {
            tracing::warn!("Search index update failed for {:?}: {}", event, err);
        }
    }
    tracing::info!("Search index worker shutting down");
}

async fn handle_event(event: &DomainEvent, deps: &SearchIndexDeps) -> Result<()> {
    match event {
        DomainEvent::GoalSaved { goal_id, .. } => {
            // Deleted between emit and processing: nothing to index.
            if let Some(goal) = deps.goal_repository.find_by_id(goal_id)? {
                deps.search_service.index_goal(&goal).await?;
            }
            Ok(())
        }
        DomainEvent::GoalDeleted { goal_id, .. } => {
            deps.search_service.remove_document(goal_id).await
        }
        DomainEvent::MeasurementSaved { measurement_id, .. } => {
            if let Some(measurement) = deps.measurement_repository.find_by_id(measurement_id)? {
                deps.search_service.index_measurement(&measurement).await?;
            }
            Ok(())
        }
        DomainEvent::MeasurementDeleted { measurement_id, .. } => {
            deps.search_service.remove_document(measurement_id).await
        }
    }
}
