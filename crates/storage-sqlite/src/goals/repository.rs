use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::{avg, count_star};
use diesel::prelude::*;

use fitfolio_core::goals::{
    Goal, GoalFilters, GoalRepositoryTrait, GoalStatus, GoalStatusRollup, Page,
};
use fitfolio_core::Result;

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::goals;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn find_by_id(&self, goal_id: &str) -> Result<Option<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = goals::table
            .find(goal_id)
            .first::<GoalDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Goal::from))
    }

    fn list(&self, user_id: &str, filters: &GoalFilters, page: Page) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = goals::table
            .filter(goals::user_id.eq(user_id))
            .into_boxed();
        if let Some(status) = filters.status {
            query = query.filter(goals::status.eq(status.as_str()));
        }
        if let Some(kind) = filters.kind {
            query = query.filter(goals::kind.eq(kind.as_str()));
        }
        let rows = query
            .order(goals::created_at.desc())
            .then_order_by(goals::id.desc())
            .offset(page.offset)
            .limit(page.limit)
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }

    fn summarize(&self, user_id: &str) -> Result<Vec<GoalStatusRollup>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .group_by(goals::status)
            .select((goals::status, count_star(), avg(goals::progress_percentage)))
            .load::<(String, i64, Option<f64>)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .filter_map(|(status, count, avg_progress)| {
                GoalStatus::parse(&status).map(|status| GoalStatusRollup {
                    status,
                    count,
                    avg_progress,
                })
            })
            .collect())
    }

    async fn insert(&self, goal: Goal) -> Result<Goal> {
        let goal_db = GoalDB::from(goal);
        self.writer
            .exec(move |conn| -> Result<Goal> {
                let row = diesel::insert_into(goals::table)
                    .values(&goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(row))
            })
            .await
    }

    async fn update(&self, goal: Goal) -> Result<Goal> {
        let goal_db = GoalDB::from(goal);
        self.writer
            .exec(move |conn| -> Result<Goal> {
                let goal_id = goal_db.id.clone();
                diesel::update(goals::table.find(&goal_id))
                    .set(&goal_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let row = goals::table
                    .find(&goal_id)
                    .first::<GoalDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(row))
            })
            .await
    }

    async fn delete(&self, goal_id: &str) -> Result<usize> {
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                Ok(diesel::delete(goals::table.find(&goal_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
