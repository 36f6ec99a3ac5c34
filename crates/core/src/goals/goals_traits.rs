use crate::errors::Result;
use crate::goals::goals_model::{
    Goal, GoalFilters, GoalStatusRollup, GoalSummary, GoalUpdate, NewGoal, Page,
};
use async_trait::async_trait;

/// Trait for goal repository operations.
///
/// Reads are synchronous off the connection pool; writes go through the
/// storage layer's single-writer actor and are async.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn find_by_id(&self, goal_id: &str) -> Result<Option<Goal>>;
    /// Goals of one user, newest first.
    fn list(&self, user_id: &str, filters: &GoalFilters, page: Page) -> Result<Vec<Goal>>;
    /// Per-status counts and mean progress, computed by the store.
    fn summarize(&self, user_id: &str) -> Result<Vec<GoalStatusRollup>>;
    async fn insert(&self, goal: Goal) -> Result<Goal>;
    async fn update(&self, goal: Goal) -> Result<Goal>;
    async fn delete(&self, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations.
///
/// Every operation takes the caller's user id; records owned by another
/// user are reported as not found.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<Goal>;
    fn get_goal(&self, user_id: &str, goal_id: &str) -> Result<Goal>;
    fn list_goals(&self, user_id: &str, filters: GoalFilters, page: Page) -> Result<Vec<Goal>>;
    async fn update_goal(&self, user_id: &str, goal_id: &str, update: GoalUpdate) -> Result<Goal>;
    async fn update_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        current_value: f64,
    ) -> Result<Goal>;
    /// Idempotent: deleting an absent (or foreign) id returns `false`.
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<bool>;
    fn summary(&self, user_id: &str) -> Result<GoalSummary>;
}
