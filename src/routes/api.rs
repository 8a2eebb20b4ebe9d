// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::stats::daily_trend;
use crate::models::{
    ActivityType, DailyCount, PredictionInput, PredictionResult, StatsSummary, Workout,
    WorkoutFilterSpec, WorkoutForm,
};
use crate::time_utils::parse_date_input;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Days covered by the dashboard trend.
const TREND_DAYS: u32 = 7;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
        .route("/api/stats", get(get_stats))
        .route("/api/predict", post(predict_activity))
}

// ─── Filters ─────────────────────────────────────────────────

/// Workout filter query string. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutFilterQuery {
    activity_type: Option<String>,
    /// Minutes
    min_duration: Option<String>,
    /// Minutes
    max_duration: Option<String>,
    /// RFC3339 or YYYY-MM-DD
    start_date: Option<String>,
    /// RFC3339 or YYYY-MM-DD
    end_date: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_minutes(name: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::BadRequest(format!("{} must be a number, got {:?}", name, raw)))
}

impl WorkoutFilterQuery {
    fn into_spec(self) -> Result<WorkoutFilterSpec> {
        let activity_type = non_empty(self.activity_type.as_deref())
            .map(|raw| {
                raw.parse::<ActivityType>()
                    .map_err(|e| AppError::BadRequest(e.to_string()))
            })
            .transpose()?;

        let start_date = non_empty(self.start_date.as_deref())
            .map(parse_date_input)
            .transpose()?;
        let end_date = non_empty(self.end_date.as_deref())
            .map(parse_date_input)
            .transpose()?;

        let min_duration = non_empty(self.min_duration.as_deref())
            .map(|raw| parse_minutes("minDuration", raw))
            .transpose()?;
        let max_duration = non_empty(self.max_duration.as_deref())
            .map(|raw| parse_minutes("maxDuration", raw))
            .transpose()?;

        Ok(WorkoutFilterSpec {
            activity_type,
            min_duration,
            max_duration,
            start_date,
            end_date,
        })
    }
}

// ─── Workouts ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    pub workouts: Vec<Workout>,
    pub total: usize,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateWorkoutResponse {
    pub id: String,
}

/// List the user's workouts, most recent first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<WorkoutFilterQuery>,
) -> Result<Json<WorkoutsResponse>> {
    let spec = params.into_spec()?;
    let workouts = state.workouts.query(&user.user_id, &spec).await?;

    Ok(Json(WorkoutsResponse {
        total: workouts.len(),
        workouts,
    }))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    state
        .workouts
        .get(&user.user_id, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(form): Json<WorkoutForm>,
) -> Result<(StatusCode, Json<CreateWorkoutResponse>)> {
    form.validate()?;
    let id = state.workouts.create(&user.user_id, &form).await?;

    Ok((StatusCode::CREATED, Json(CreateWorkoutResponse { id })))
}

/// Replace every field of an existing workout.
async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(form): Json<WorkoutForm>,
) -> Result<StatusCode> {
    form.validate()?;
    state.workouts.update(&user.user_id, &id, &form).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a workout. Succeeds even if it is already gone.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.workouts.delete(&user.user_id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ─── Stats ───────────────────────────────────────────────────

/// Dashboard statistics response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub summary: StatsSummary,
    /// Workouts per day for the last week, oldest first
    pub last_7_days: Vec<DailyCount>,
}

/// Summary statistics over the (optionally filtered) workout list.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<WorkoutFilterQuery>,
) -> Result<Json<StatsResponse>> {
    let spec = params.into_spec()?;
    let workouts = state.workouts.query(&user.user_id, &spec).await?;

    let today = chrono::Utc::now().date_naive();
    Ok(Json(StatsResponse {
        last_7_days: daily_trend(&workouts, today, TREND_DAYS),
        summary: StatsSummary::from_workouts(&workouts),
    }))
}

// ─── Prediction ──────────────────────────────────────────────

/// Guess the activity type. Remote model failures are absorbed.
async fn predict_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<PredictionInput>,
) -> Result<Json<PredictionResult>> {
    input.validate()?;
    tracing::debug!(user_id = %user.user_id, ?input, "Predicting activity type");

    Ok(Json(state.predictor.predict(&input).await))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_unconstrained() {
        let query = WorkoutFilterQuery {
            activity_type: Some("".to_string()),
            min_duration: Some("".to_string()),
            max_duration: Some(" ".to_string()),
            start_date: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.into_spec().unwrap(), WorkoutFilterSpec::default());
    }

    #[test]
    fn test_query_parses_typed_values() {
        let query = WorkoutFilterQuery {
            activity_type: Some("Gym Workout".to_string()),
            min_duration: Some("0".to_string()),
            end_date: Some("2024-01-31".to_string()),
            ..Default::default()
        };
        let spec = query.into_spec().unwrap();

        assert_eq!(spec.activity_type, Some(ActivityType::GymWorkout));
        assert_eq!(spec.min_duration, Some(0.0));
        assert_eq!(spec.max_duration, None);
        assert!(spec.end_date.is_some());
    }

    #[test]
    fn test_query_rejects_unknown_activity_and_bad_dates() {
        let query = WorkoutFilterQuery {
            activity_type: Some("Swimming".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.into_spec(), Err(AppError::BadRequest(_))));

        let query = WorkoutFilterQuery {
            start_date: Some("last week".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.into_spec(), Err(AppError::BadRequest(_))));

        let query = WorkoutFilterQuery {
            max_duration: Some("an hour".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.into_spec(), Err(AppError::BadRequest(_))));
    }
}
