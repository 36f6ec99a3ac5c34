use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;

use fitfolio_core::goals::{Goal, GoalFilters, GoalKind, GoalStatus, GoalSummary, GoalUpdate, NewGoal, Page};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalListQuery {
    status: Option<GoalStatus>,
    kind: Option<GoalKind>,
    offset: Option<i64>,
    limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProgressRequest {
    current_value: f64,
}

async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<GoalListQuery>,
) -> ApiResult<Json<Vec<Goal>>> {
    let filters = GoalFilters {
        status: query.status,
        kind: query.kind,
    };
    let page = Page {
        offset: query.offset.unwrap_or(0).max(0),
        limit: query.limit.unwrap_or(100).clamp(1, 500),
    };
    let goals = state
        .goal_service
        .list_goals(&current_user.user_id, filters, page)?;
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(new_goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state
        .goal_service
        .create_goal(&current_user.user_id, new_goal)
        .await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<Goal>> {
    let goal = state.goal_service.get_goal(&current_user.user_id, &id)?;
    Ok(Json(goal))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(update): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_service
        .update_goal(&current_user.user_id, &id, update)
        .await?;
    Ok(Json(goal))
}

async fn update_goal_progress(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(request): Json<UpdateProgressRequest>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_service
        .update_progress(&current_user.user_id, &id, request.current_value)
        .await?;
    Ok(Json(goal))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .goal_service
        .delete_goal(&current_user.user_id, &id)
        .await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

async fn goal_summary(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> ApiResult<Json<GoalSummary>> {
    let summary = state.goal_service.summary(&current_user.user_id)?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/summary", get(goal_summary))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/progress", put(update_goal_progress))
}
