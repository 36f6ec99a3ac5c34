use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::Page;

use super::measurements_model::{Measurement, MeasurementUpdate, NewMeasurement};
use super::measurements_traits::{MeasurementRepositoryTrait, MeasurementServiceTrait};

pub struct MeasurementService {
    repository: Arc<dyn MeasurementRepositoryTrait>,
    events: Arc<dyn DomainEventSink>,
}

impl MeasurementService {
    pub fn new(
        repository: Arc<dyn MeasurementRepositoryTrait>,
        events: Arc<dyn DomainEventSink>,
    ) -> Self {
        MeasurementService { repository, events }
    }

    fn fetch_owned(&self, user_id: &str, measurement_id: &str) -> Result<Measurement> {
        match self.repository.find_by_id(measurement_id)? {
            Some(measurement) if measurement.user_id == user_id => Ok(measurement),
            _ => Err(Error::NotFound(format!(
                "Measurement {} not found",
                measurement_id
            ))),
        }
    }
}

fn validate_dimensions(values: &[Option<f64>]) -> Result<()> {
    if values.iter().flatten().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "measurement values must be finite and non-negative".to_string(),
        )));
    }
    Ok(())
}

#[async_trait]
impl MeasurementServiceTrait for MeasurementService {
    async fn log_measurement(
        &self,
        user_id: &str,
        new_measurement: NewMeasurement,
    ) -> Result<Measurement> {
        validate_dimensions(&[
            new_measurement.weight,
            new_measurement.height,
            new_measurement.body_fat,
            new_measurement.chest,
            new_measurement.waist,
            new_measurement.hips,
        ])?;

        let now = Utc::now().naive_utc();
        let measurement = Measurement {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            recorded_at: new_measurement.recorded_at,
            weight: new_measurement.weight,
            height: new_measurement.height,
            body_fat: new_measurement.body_fat,
            chest: new_measurement.chest,
            waist: new_measurement.waist,
            hips: new_measurement.hips,
            notes: new_measurement.notes,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.insert(measurement).await?;
        self.events
            .emit(DomainEvent::measurement_saved(&created.id, user_id));
        Ok(created)
    }

    fn get_measurement(&self, user_id: &str, measurement_id: &str) -> Result<Measurement> {
        self.fetch_owned(user_id, measurement_id)
    }

    fn list_measurements(&self, user_id: &str, page: Page) -> Result<Vec<Measurement>> {
        self.repository.list(user_id, page)
    }

    fn latest_measurement(&self, user_id: &str) -> Result<Option<Measurement>> {
        self.repository.latest(user_id)
    }

    async fn update_measurement(
        &self,
        user_id: &str,
        measurement_id: &str,
        update: MeasurementUpdate,
    ) -> Result<Measurement> {
        validate_dimensions(&[
            update.weight,
            update.height,
            update.body_fat,
            update.chest,
            update.waist,
            update.hips,
        ])?;

        let mut measurement = self.fetch_owned(user_id, measurement_id)?;
        if let Some(recorded_at) = update.recorded_at {
            measurement.recorded_at = recorded_at;
        }
        if let Some(weight) = update.weight {
            measurement.weight = Some(weight);
        }
        if let Some(height) = update.height {
            measurement.height = Some(height);
        }
        if let Some(body_fat) = update.body_fat {
            measurement.body_fat = Some(body_fat);
        }
        if let Some(chest) = update.chest {
            measurement.chest = Some(chest);
        }
        if let Some(waist) = update.waist {
            measurement.waist = Some(waist);
        }
        if let Some(hips) = update.hips {
            measurement.hips = Some(hips);
        }
        if let Some(notes) = update.notes {
            measurement.notes = Some(notes);
        }
        measurement.updated_at = Utc::now().naive_utc();

        let updated = self.repository.update(measurement).await?;
        self.events
            .emit(DomainEvent::measurement_saved(&updated.id, user_id));
        Ok(updated)
    }

    async fn delete_measurement(&self, user_id: &str, measurement_id: &str) -> Result<bool> {
        let owned = matches!(
            self.repository.find_by_id(measurement_id)?,
            Some(measurement) if measurement.user_id == user_id
        );
        if !owned {
            return Ok(false);
        }
        let deleted = self.repository.delete(measurement_id).await? > 0;
        if deleted {
            self.events
                .emit(DomainEvent::measurement_deleted(measurement_id, user_id));
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockDomainEventSink;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MockMeasurementRepository {
        measurements: RwLock<Vec<Measurement>>,
    }

    #[async_trait]
    impl MeasurementRepositoryTrait for MockMeasurementRepository {
        fn find_by_id(&self, measurement_id: &str) -> Result<Option<Measurement>> {
            Ok(self
                .measurements
                .read()
                .unwrap()
                .iter()
                .find(|m| m.id == measurement_id)
                .cloned())
        }

        fn list(&self, user_id: &str, page: Page) -> Result<Vec<Measurement>> {
            let mut list: Vec<Measurement> = self
                .measurements
                .read()
                .unwrap()
                .iter()
                .filter(|m| m.user_id == user_id)
                .cloned()
                .collect();
            list.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
            Ok(list
                .into_iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect())
        }

        fn latest(&self, user_id: &str) -> Result<Option<Measurement>> {
            Ok(self.list(user_id, Page::default())?.into_iter().next())
        }

        async fn insert(&self, measurement: Measurement) -> Result<Measurement> {
            self.measurements.write().unwrap().push(measurement.clone());
            Ok(measurement)
        }

        async fn update(&self, measurement: Measurement) -> Result<Measurement> {
            let mut measurements = self.measurements.write().unwrap();
            let slot = measurements
                .iter_mut()
                .find(|m| m.id == measurement.id)
                .ok_or_else(|| {
                    Error::NotFound(format!("Measurement {} not found", measurement.id))
                })?;
            *slot = measurement.clone();
            Ok(measurement)
        }

        async fn delete(&self, measurement_id: &str) -> Result<usize> {
            let mut measurements = self.measurements.write().unwrap();
            let before = measurements.len();
            measurements.retain(|m| m.id != measurement_id);
            Ok(before - measurements.len())
        }
    }

    fn service() -> (MeasurementService, MockDomainEventSink) {
        let sink = MockDomainEventSink::new();
        let service = MeasurementService::new(
            Arc::new(MockMeasurementRepository::default()),
            Arc::new(sink.clone()),
        );
        (service, sink)
    }

    fn sample(weight: f64, days_ago: i64) -> NewMeasurement {
        NewMeasurement {
            recorded_at: Utc::now().naive_utc() - chrono::Duration::days(days_ago),
            weight: Some(weight),
            height: None,
            body_fat: None,
            chest: None,
            waist: None,
            hips: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn log_and_latest() {
        let (service, sink) = service();
        service.log_measurement("u1", sample(84.0, 7)).await.unwrap();
        service.log_measurement("u1", sample(83.2, 1)).await.unwrap();

        let latest = service.latest_measurement("u1").unwrap().unwrap();
        assert_eq!(latest.weight, Some(83.2));
        assert_eq!(sink.len(), 2);
    }

    #[tokio::test]
    async fn negative_dimension_is_rejected() {
        let (service, _) = service();
        let result = service.log_measurement("u1", sample(-3.0, 0)).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn foreign_measurement_reads_as_not_found() {
        let (service, _) = service();
        let m = service.log_measurement("u1", sample(84.0, 0)).await.unwrap();

        assert!(matches!(
            service.get_measurement("u2", &m.id),
            Err(Error::NotFound(_))
        ));
        assert!(!service.delete_measurement("u2", &m.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (service, _) = service();
        let m = service.log_measurement("u1", sample(84.0, 0)).await.unwrap();

        assert!(service.delete_measurement("u1", &m.id).await.unwrap());
        assert!(!service.delete_measurement("u1", &m.id).await.unwrap());
    }
}
