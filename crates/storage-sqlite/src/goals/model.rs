//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fitfolio_core::goals::{Goal, GoalDirection, GoalKind, GoalStatus};

/// Database model for goals.
///
/// Enums travel as their snake_case strings; `progress_history` is the
/// JSON-encoded sample array.
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: String,
    pub direction: String,
    pub start_value: Option<f64>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub target_date: NaiveDate,
    pub status: String,
    pub progress_percentage: f64,
    pub days_remaining: i64,
    pub progress_history: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            kind: GoalKind::parse(&db.kind).unwrap_or(GoalKind::Custom),
            direction: GoalDirection::parse(&db.direction).unwrap_or(GoalDirection::Increase),
            start_value: db.start_value,
            target_value: db.target_value,
            current_value: db.current_value,
            target_date: db.target_date,
            status: GoalStatus::parse(&db.status).unwrap_or(GoalStatus::InProgress),
            progress_percentage: db.progress_percentage,
            days_remaining: db.days_remaining,
            progress_history: serde_json::from_str(&db.progress_history).unwrap_or_default(),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            title: domain.title,
            description: domain.description,
            kind: domain.kind.as_str().to_string(),
            direction: domain.direction.as_str().to_string(),
            start_value: domain.start_value,
            target_value: domain.target_value,
            current_value: domain.current_value,
            target_date: domain.target_date,
            status: domain.status.as_str().to_string(),
            progress_percentage: domain.progress_percentage,
            days_remaining: domain.days_remaining,
            progress_history: serde_json::to_string(&domain.progress_history)
                .unwrap_or_else(|_| "[]".to_string()),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
