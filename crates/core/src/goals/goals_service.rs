use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};

use super::goals_model::{
    Goal, GoalFilters, GoalStatus, GoalSummary, GoalUpdate, NewGoal, Page, ProgressSample,
};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use super::progress;

pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    events: Arc<dyn DomainEventSink>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>, events: Arc<dyn DomainEventSink>) -> Self {
        GoalService { repository, events }
    }

    /// Loads a goal and verifies ownership. A record owned by another user
    /// is reported as not found; existence is not disclosed.
    fn fetch_owned(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        match self.repository.find_by_id(goal_id)? {
            Some(goal) if goal.user_id == user_id => Ok(goal),
            _ => Err(not_found(goal_id)),
        }
    }

    /// Refreshes derived fields for presentation without persisting them.
    fn refresh_for_read(mut goal: Goal) -> Goal {
        let today = Utc::now().date_naive();
        goal.days_remaining = progress::days_remaining(goal.target_date, today);
        goal.status =
            progress::derive_status(goal.status, goal.progress_percentage, goal.target_date, today);
        goal
    }
}

fn not_found(goal_id: &str) -> Error {
    Error::NotFound(format!("Goal {} not found", goal_id))
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "title".to_string(),
        )));
    }
    Ok(())
}

fn validate_values(values: &[Option<f64>]) -> Result<()> {
    if values.iter().flatten().any(|v| !v.is_finite()) {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "numeric goal values must be finite".to_string(),
        )));
    }
    Ok(())
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal> {
        validate_title(&new_goal.title)?;
        validate_values(&[
            new_goal.start_value,
            new_goal.target_value,
            new_goal.current_value,
        ])?;

        let now = Utc::now().naive_utc();
        let today = now.date();
        let direction = new_goal
            .direction
            .unwrap_or_else(|| new_goal.kind.default_direction());
        // A goal starts where it starts: no explicit current value means the
        // start value is the current one.
        let current_value = new_goal.current_value.or(new_goal.start_value);

        let progress_percentage = progress::progress_percentage(
            direction,
            new_goal.start_value,
            new_goal.target_value,
            current_value,
        );
        let status = progress::initial_status(
            progress_percentage,
            new_goal.start_value,
            new_goal.current_value,
            new_goal.target_date,
            today,
        );

        let progress_history = current_value
            .map(|value| {
                vec![ProgressSample {
                    timestamp: now,
                    value,
                }]
            })
            .unwrap_or_default();

        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: new_goal.title,
            description: new_goal.description,
            kind: new_goal.kind,
            direction,
            start_value: new_goal.start_value,
            target_value: new_goal.target_value,
            current_value,
            target_date: new_goal.target_date,
            status,
            progress_percentage,
            days_remaining: progress::days_remaining(new_goal.target_date, today),
            progress_history,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.insert(goal).await?;
        log::debug!("created goal {} for user {}", created.id, user_id);
        self.events
            .emit(DomainEvent::goal_saved(&created.id, user_id));
        Ok(created)
    }

    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.fetch_owned(user_id, goal_id).map(Self::refresh_for_read)
    }

    fn list_goals(&self, user_id: &str, filters: GoalFilters, page: Page) -> Result<Vec<Goal>> {
        let goals = self.repository.list(user_id, &filters, page)?;
        Ok(goals.into_iter().map(Self::refresh_for_read).collect())
    }

    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }
        validate_values(&[update.start_value, update.target_value, update.current_value])?;

        let mut goal = self.fetch_owned(user_id, goal_id)?;
        let now = Utc::now().naive_utc();
        let today = now.date();

        let values_changed = update.touches_values();
        let date_changed = update.target_date.is_some();
        let supplied_current = update.current_value;

        if let Some(title) = update.title {
            goal.title = title;
        }
        if let Some(description) = update.description {
            goal.description = Some(description);
        }
        if let Some(value) = update.start_value {
            goal.start_value = Some(value);
        }
        if let Some(value) = update.target_value {
            goal.target_value = Some(value);
        }
        if let Some(value) = supplied_current {
            if goal.current_value != Some(value) {
                goal.progress_history.push(ProgressSample {
                    timestamp: now,
                    value,
                });
            }
            goal.current_value = Some(value);
        }
        if let Some(target_date) = update.target_date {
            goal.target_date = target_date;
        }

        if values_changed {
            goal.progress_percentage = progress::progress_percentage(
                goal.direction,
                goal.start_value,
                goal.target_value,
                goal.current_value,
            );
        }
        if values_changed || date_changed {
            goal.status = progress::derive_status(
                goal.status,
                goal.progress_percentage,
                goal.target_date,
                today,
            );
            if supplied_current.is_some() && goal.status == GoalStatus::NotStarted {
                goal.status = GoalStatus::InProgress;
            }
        }
        goal.days_remaining = progress::days_remaining(goal.target_date, today);
        goal.updated_at = now;

        let updated = self.repository.update(goal).await?;
        self.events
            .emit(DomainEvent::goal_saved(&updated.id, user_id));
        Ok(updated)
    }

    async fn update_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        current_value: f64,
    ) -> Result<Goal> {
        validate_values(&[Some(current_value)])?;

        let mut goal = self.fetch_owned(user_id, goal_id)?;
        let now = Utc::now().naive_utc();
        let today = now.date();

        let changed = goal.current_value != Some(current_value);
        goal.current_value = Some(current_value);
        goal.progress_percentage = progress::progress_percentage(
            goal.direction,
            goal.start_value,
            goal.target_value,
            goal.current_value,
        );
        goal.status = progress::derive_status(
            goal.status,
            goal.progress_percentage,
            goal.target_date,
            today,
        );
        if goal.status == GoalStatus::NotStarted {
            goal.status = GoalStatus::InProgress;
        }
        goal.days_remaining = progress::days_remaining(goal.target_date, today);
        if changed {
            goal.progress_history.push(ProgressSample {
                timestamp: now,
                value: current_value,
            });
        }
        goal.updated_at = now;

        let updated = self.repository.update(goal).await?;
        self.events
            .emit(DomainEvent::goal_saved(&updated.id, user_id));
        Ok(updated)
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<bool> {
        let owned = matches!(
            self.repository.find_by_id(goal_id)?,
            Some(goal) if goal.user_id == user_id
        );
        if !owned {
            return Ok(false);
        }
        let deleted = self.repository.delete(goal_id).await? > 0;
        if deleted {
            log::debug!("deleted goal {} for user {}", goal_id, user_id);
            self.events.emit(DomainEvent::goal_deleted(goal_id, user_id));
        }
        Ok(deleted)
    }

    fn summary(&self, user_id: &str) -> Result<GoalSummary> {
        let mut summary = GoalSummary::default();
        for rollup in self.repository.summarize(user_id)? {
            summary.total_goals += rollup.count;
            match rollup.status {
                GoalStatus::NotStarted => summary.not_started_goals = rollup.count,
                GoalStatus::InProgress => {
                    summary.in_progress_goals = rollup.count;
                    summary.avg_in_progress_percentage = rollup.avg_progress.unwrap_or(0.0);
                }
                GoalStatus::Completed => summary.completed_goals = rollup.count,
                GoalStatus::Expired => summary.expired_goals = rollup.count,
            }
        }
        if summary.total_goals > 0 {
            summary.avg_completion_rate =
                summary.completed_goals as f64 / summary.total_goals as f64 * 100.0;
        }
        Ok(summary)
    }
}
