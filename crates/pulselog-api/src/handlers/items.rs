//! Public filtered workout listing (`/api/items`).

use axum::extract::{Query, State};
use axum::Json;

use pulselog_core::defaults::API_RESULT_LIMIT;
use pulselog_core::{SearchCriteria, SearchParams, Workout, WorkoutRepository};

use crate::error::ApiResult;
use crate::AppState;

/// `GET /api/items`: machine-facing listing with the full filter set
/// (`search`, `type`, `intensity`, `minDuration`, `maxDuration`, `sort`).
///
/// Rate-limited by the `/api` middleware; row cap is fixed at 200.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Workout>>> {
    let criteria = SearchCriteria::from_params(&params);
    let rows = state
        .db
        .workouts
        .search(&criteria, API_RESULT_LIMIT)
        .await?;
    Ok(Json(rows))
}
