//! Measurements domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A body measurement snapshot. All dimensions are optional; users log
/// whatever they track (weights in kg, lengths in cm, body fat in percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: String,
    pub user_id: String,
    pub recorded_at: NaiveDateTime,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub body_fat: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for logging a measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeasurement {
    pub recorded_at: NaiveDateTime,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub body_fat: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub notes: Option<String>,
}

/// Partial measurement update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementUpdate {
    pub recorded_at: Option<NaiveDateTime>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub body_fat: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub notes: Option<String>,
}
