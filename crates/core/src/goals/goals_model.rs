//! Goals domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Semantic category of a goal.
///
/// The category determines the default [`GoalDirection`] but carries no other
/// behavior; a goal of any kind may override its direction explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Weight,
    BodyFat,
    Measurement,
    Workout,
    Nutrition,
    Custom,
}

impl GoalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalKind::Weight => "weight",
            GoalKind::BodyFat => "body_fat",
            GoalKind::Measurement => "measurement",
            GoalKind::Workout => "workout",
            GoalKind::Nutrition => "nutrition",
            GoalKind::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weight" => Some(GoalKind::Weight),
            "body_fat" => Some(GoalKind::BodyFat),
            "measurement" => Some(GoalKind::Measurement),
            "workout" => Some(GoalKind::Workout),
            "nutrition" => Some(GoalKind::Nutrition),
            "custom" => Some(GoalKind::Custom),
            _ => None,
        }
    }

    /// Default direction when the caller does not specify one.
    ///
    /// Weight and body-fat goals are overwhelmingly reduction goals; every
    /// other category defaults to increase. Callers that need the opposite
    /// (e.g. weight gain) set `NewGoal::direction`.
    pub fn default_direction(&self) -> GoalDirection {
        match self {
            GoalKind::Weight | GoalKind::BodyFat => GoalDirection::Decrease,
            _ => GoalDirection::Increase,
        }
    }
}

/// Whether progress is measured by decreasing or increasing the tracked value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    Increase,
    Decrease,
    Maintain,
}

impl GoalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalDirection::Increase => "increase",
            GoalDirection::Decrease => "decrease",
            GoalDirection::Maintain => "maintain",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "increase" => Some(GoalDirection::Increase),
            "decrease" => Some(GoalDirection::Decrease),
            "maintain" => Some(GoalDirection::Maintain),
            _ => None,
        }
    }
}

/// Lifecycle state of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
    Expired,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "not_started",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
            GoalStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(GoalStatus::NotStarted),
            "in_progress" => Some(GoalStatus::InProgress),
            "completed" => Some(GoalStatus::Completed),
            "expired" => Some(GoalStatus::Expired),
            _ => None,
        }
    }
}

/// One point of the append-only progress history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// Domain model representing a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: GoalKind,
    pub direction: GoalDirection,
    pub start_value: Option<f64>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub target_date: NaiveDate,
    pub status: GoalStatus,
    /// Derived, clamped to [0, 100]. Persisted for query efficiency.
    pub progress_percentage: f64,
    /// Derived, never negative. Recomputed on read and update.
    pub days_remaining: i64,
    pub progress_history: Vec<ProgressSample>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub kind: GoalKind,
    /// Overrides the kind's default direction when present.
    pub direction: Option<GoalDirection>,
    pub start_value: Option<f64>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub target_date: NaiveDate,
}

/// Partial update for a goal. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_value: Option<f64>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub target_date: Option<NaiveDate>,
}

impl GoalUpdate {
    /// True when the update touches any input of the progress calculator.
    pub fn touches_values(&self) -> bool {
        self.start_value.is_some() || self.target_value.is_some() || self.current_value.is_some()
    }
}

/// Filters for listing goals.
#[derive(Debug, Clone, Default)]
pub struct GoalFilters {
    pub status: Option<GoalStatus>,
    pub kind: Option<GoalKind>,
}

/// Offset/limit pagination.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            offset: 0,
            limit: 100,
        }
    }
}

/// One row of the per-status aggregation computed by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalStatusRollup {
    pub status: GoalStatus,
    pub count: i64,
    pub avg_progress: Option<f64>,
}

/// Summary of a user's goals, grouped by status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub total_goals: i64,
    pub not_started_goals: i64,
    pub in_progress_goals: i64,
    pub completed_goals: i64,
    pub expired_goals: i64,
    /// Mean progress of the in-progress group, 0 when the group is empty.
    pub avg_in_progress_percentage: f64,
    /// completed / total * 100, 0 when the user has no goals.
    pub avg_completion_rate: f64,
}
