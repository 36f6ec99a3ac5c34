use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use fitfolio_core::goals::Page;
use fitfolio_core::measurements::{Measurement, MeasurementUpdate, NewMeasurement};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeasurementListQuery {
    offset: Option<i64>,
    limit: Option<i64>,
}

async fn list_measurements(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<MeasurementListQuery>,
) -> ApiResult<Json<Vec<Measurement>>> {
    let page = Page {
        offset: query.offset.unwrap_or(0).max(0),
        limit: query.limit.unwrap_or(100).clamp(1, 500),
    };
    let measurements = state
        .measurement_service
        .list_measurements(&current_user.user_id, page)?;
    Ok(Json(measurements))
}

async fn log_measurement(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(new_measurement): Json<NewMeasurement>,
) -> ApiResult<(StatusCode, Json<Measurement>)> {
    let measurement = state
        .measurement_service
        .log_measurement(&current_user.user_id, new_measurement)
        .await?;
    Ok((StatusCode::CREATED, Json(measurement)))
}

async fn latest_measurement(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<Option<Measurement>>> {
    let measurement = state
        .measurement_service
        .latest_measurement(&current_user.user_id)?;
    Ok(Json(measurement))
}

async fn get_measurement(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<Measurement>> {
    let measurement = state
        .measurement_service
        .get_measurement(&current_user.user_id, &id)?;
    Ok(Json(measurement))
}

async fn update_measurement(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(update): Json<MeasurementUpdate>,
) -> ApiResult<Json<Measurement>> {
    let measurement = state
        .measurement_service
        .update_measurement(&current_user.user_id, &id, update)
        .await?;
    Ok(Json(measurement))
}

async fn delete_measurement(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .measurement_service
        .delete_measurement(&current_user.user_id, &id)
        .await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/measurements",
            get(list_measurements).post(log_measurement),
        )
        .route("/measurements/latest", get(latest_measurement))
        .route(
            "/measurements/{id}",
            get(get_measurement)
                .put(update_measurement)
                .delete(delete_measurement),
        )
}
