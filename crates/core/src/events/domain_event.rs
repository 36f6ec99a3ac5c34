//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. Runtime adapters
/// translate them into platform-specific actions (search-index updates,
/// future notification fan-out, etc.). Events carry identifiers, not
/// payloads: consumers re-read the record so a slow consumer never observes
/// a stale document shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A goal was created or updated.
    GoalSaved { goal_id: String, user_id: String },

    /// A goal was deleted.
    GoalDeleted { goal_id: String, user_id: String },

    /// A body measurement was created or updated.
    MeasurementSaved {
        measurement_id: String,
        user_id: String,
    },

    /// A body measurement was deleted.
    MeasurementDeleted {
        measurement_id: String,
        user_id: String,
    },
}

impl DomainEvent {
    /// Creates a GoalSaved event.
    pub fn goal_saved(goal_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::GoalSaved {
            goal_id: goal_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Creates a GoalDeleted event.
    pub fn goal_deleted(goal_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self::GoalDeleted {
            goal_id: goal_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Creates a MeasurementSaved event.
    pub fn measurement_saved(
        measurement_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self::MeasurementSaved {
            measurement_id: measurement_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Creates a MeasurementDeleted event.
    pub fn measurement_deleted(
        measurement_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self::MeasurementDeleted {
            measurement_id: measurement_id.into(),
            user_id: user_id.into(),
        }
    }
}
