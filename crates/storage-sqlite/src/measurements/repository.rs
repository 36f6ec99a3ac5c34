use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use fitfolio_core::goals::Page;
use fitfolio_core::measurements::{Measurement, MeasurementRepositoryTrait};
use fitfolio_core::Result;

use super::model::MeasurementDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::measurements;

pub struct MeasurementRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MeasurementRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MeasurementRepository { pool, writer }
    }
}

#[async_trait]
impl MeasurementRepositoryTrait for MeasurementRepository {
    fn find_by_id(&self, measurement_id: &str) -> Result<Option<Measurement>> {
        let mut conn = get_connection(&self.pool)?;
        let row = measurements::table
            .find(measurement_id)
            .first::<MeasurementDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Measurement::from))
    }

    fn list(&self, user_id: &str, page: Page) -> Result<Vec<Measurement>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = measurements::table
            .filter(measurements::user_id.eq(user_id))
            .order(measurements::recorded_at.desc())
            .then_order_by(measurements::id.desc())
            .offset(page.offset)
            .limit(page.limit)
            .load::<MeasurementDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Measurement::from).collect())
    }

    fn latest(&self, user_id: &str) -> Result<Option<Measurement>> {
        let mut conn = get_connection(&self.pool)?;
        let row = measurements::table
            .filter(measurements::user_id.eq(user_id))
            .order(measurements::recorded_at.desc())
            .first::<MeasurementDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Measurement::from))
    }

    async fn insert(&self, measurement: Measurement) -> Result<Measurement> {
        let measurement_db = MeasurementDB::from(measurement);
        self.writer
            .exec(move |conn| -> Result<Measurement> {
                let row = diesel::insert_into(measurements::table)
                    .values(&measurement_db)
                    .returning(MeasurementDB::as_returning())
                    .get_result::<MeasurementDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Measurement::from(row))
            })
            .await
    }

    async fn update(&self, measurement: Measurement) -> Result<Measurement> {
        let measurement_db = MeasurementDB::from(measurement);
        self.writer
            .exec(move |conn| -> Result<Measurement> {
                let measurement_id = measurement_db.id.clone();
                diesel::update(measurements::table.find(&measurement_id))
                    .set(&measurement_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let row = measurements::table
                    .find(&measurement_id)
                    .first::<MeasurementDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Measurement::from(row))
            })
            .await
    }

    async fn delete(&self, measurement_id: &str) -> Result<usize> {
        let measurement_id = measurement_id.to_string();
        self.writer
            .exec(move |conn| -> Result<usize> {
                Ok(diesel::delete(measurements::table.find(&measurement_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
