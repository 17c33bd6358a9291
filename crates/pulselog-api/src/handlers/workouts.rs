//! Workout search, history listing, suggestions, and creation.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use pulselog_core::defaults::SEARCH_RESULT_LIMIT;
use pulselog_core::{
    textnorm, Exercise, Intensity, NewWorkout, SearchCriteria, SearchParams, Workout, WorkoutPage,
    WorkoutRepository, WorkoutType,
};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::AppState;

/// `GET /workouts/search`: filtered search across all users' workouts.
///
/// Malformed filter values degrade to "no filter on this field"; the endpoint
/// itself only fails on persistence errors.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Workout>>> {
    let criteria = SearchCriteria::from_params(&params);
    let rows = state
        .db
        .workouts
        .search(&criteria, SEARCH_RESULT_LIMIT)
        .await?;

    debug!(
        subsystem = "api",
        component = "workouts",
        op = "search",
        result_count = rows.len(),
        "Search complete"
    );
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
}

/// `GET /workouts/list?page=`: one page of the caller's history.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<WorkoutPage>> {
    let page = state
        .db
        .workouts
        .list_page(user_id, params.page.as_deref())
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(rename = "type")]
    pub workout_type: Option<String>,
}

/// `GET /workouts/suggestions?type=`: exercise suggestions for the add form.
///
/// Infallible by design: the suggester absorbs every provider failure.
pub async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Json<Vec<Exercise>> {
    let raw_type = params.workout_type.as_deref().unwrap_or("cardio");
    Json(state.suggester.suggest(raw_type).await)
}

#[derive(Debug, Deserialize)]
pub struct AddWorkoutRequest {
    pub date: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub duration_minutes: i32,
    pub intensity: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Check the mandatory write-path fields, collecting user-correctable
/// messages instead of stopping at the first failure.
fn validate_workout(
    req: &AddWorkoutRequest,
) -> Result<(NaiveDate, WorkoutType, Intensity), Vec<String>> {
    let mut errors = Vec::new();

    let date = NaiveDate::parse_from_str(req.date.trim(), "%Y-%m-%d").ok();
    if date.is_none() {
        errors.push("Date must be an ISO 8601 date (YYYY-MM-DD)".to_string());
    }

    let workout_type = req.workout_type.trim().parse::<WorkoutType>().ok();
    if workout_type.is_none() {
        errors.push("Workout type must be one of: cardio, strength, flexibility, balance, sport, other".to_string());
    }

    let intensity = req.intensity.trim().parse::<Intensity>().ok();
    if intensity.is_none() {
        errors.push("Intensity must be one of: low, medium, high".to_string());
    }

    if req.duration_minutes < 0 {
        errors.push("Duration must be a non-negative number of minutes".to_string());
    }

    match (date, workout_type, intensity) {
        (Some(date), Some(workout_type), Some(intensity)) if errors.is_empty() => {
            Ok((date, workout_type, intensity))
        }
        _ => Err(errors),
    }
}

/// `POST /workouts`: validated insert of a single workout.
pub async fn add_workout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<AddWorkoutRequest>,
) -> ApiResult<Response> {
    let (date, workout_type, intensity) = match validate_workout(&req) {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "errors": errors })),
            )
                .into_response());
        }
    };

    // Notes are free text from the user; strip markup before persisting.
    let notes = req
        .notes
        .as_deref()
        .map(textnorm::strip_tags)
        .filter(|n| !n.is_empty());

    let id = state
        .db
        .workouts
        .insert(NewWorkout {
            user_id,
            date,
            workout_type,
            duration_minutes: req.duration_minutes,
            intensity,
            notes,
        })
        .await?;

    debug!(
        subsystem = "api",
        component = "workouts",
        op = "add",
        user_id,
        workout_id = id,
        "Workout recorded"
    );

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))).into_response())
}
