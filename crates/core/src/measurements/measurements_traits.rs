use crate::errors::Result;
use crate::goals::Page;
use crate::measurements::measurements_model::{Measurement, MeasurementUpdate, NewMeasurement};
use async_trait::async_trait;

/// Trait for measurement repository operations.
#[async_trait]
pub trait MeasurementRepositoryTrait: Send + Sync {
    fn find_by_id(&self, measurement_id: &str) -> Result<Option<Measurement>>;
    /// Measurements of one user, most recently recorded first.
    fn list(&self, user_id: &str, page: Page) -> Result<Vec<Measurement>>;
    fn latest(&self, user_id: &str) -> Result<Option<Measurement>>;
    async fn insert(&self, measurement: Measurement) -> Result<Measurement>;
    async fn update(&self, measurement: Measurement) -> Result<Measurement>;
    async fn delete(&self, measurement_id: &str) -> Result<usize>;
}

/// Trait for measurement service operations.
#[async_trait]
pub trait MeasurementServiceTrait: Send + Sync {
    async fn log_measurement(
        &self,
        user_id: &str,
        new_measurement: NewMeasurement,
    ) -> Result<Measurement>;
    fn get_measurement(&self, user_id: &str, measurement_id: &str) -> Result<Measurement>;
    fn list_measurements(&self, user_id: &str, page: Page) -> Result<Vec<Measurement>>;
    fn latest_measurement(&self, user_id: &str) -> Result<Option<Measurement>>;
    async fn update_measurement(
        &self,
        user_id: &str,
        measurement_id: &str,
        update: MeasurementUpdate,
    ) -> Result<Measurement>;
    /// Idempotent: deleting an absent (or foreign) id returns `false`.
    async fn delete_measurement(&self, user_id: &str, measurement_id: &str) -> Result<bool>;
}
