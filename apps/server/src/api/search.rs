use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;

use fitfolio_core::search::SearchDocument;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    limit: Option<i64>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<SearchDocument>>> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let hits = state
        .search_service
        .search(&current_user.user_id, &query.q, limit)?;
    Ok(Json(hits))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/search", get(search))
}
