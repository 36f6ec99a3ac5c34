//! Database models for measurements.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fitfolio_core::measurements::Measurement;

/// Database model for body measurements.
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
#[diesel(table_name = crate::schema::measurements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MeasurementDB {
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

impl From<MeasurementDB> for Measurement {
    fn from(db: MeasurementDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            recorded_at: db.recorded_at,
            weight: db.weight,
            height: db.height,
            body_fat: db.body_fat,
            chest: db.chest,
            waist: db.waist,
            hips: db.hips,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Measurement> for MeasurementDB {
    fn from(domain: Measurement) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id,
            recorded_at: domain.recorded_at,
            weight: domain.weight,
            height: domain.height,
            body_fat: domain.body_fat,
            chest: domain.chest,
            waist: domain.waist,
            hips: domain.hips,
            notes: domain.notes,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
