use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    plans::catalog::Exercise,
    profiles::services::require_profile,
    progress::{
        repo_types::{ExerciseCount, LogEntry},
        services::{exercise_counts, log_workout, MAX_REPS_OR_TIME_LEN},
    },
    state::AppState,
};

/// Request body for logging a completed set.
#[derive(Debug, Deserialize)]
pub struct LogWorkoutRequest {
    pub exercise: String,
    #[serde(default)]
    pub reps_or_time: String,
}

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:username/workouts", get(list_workouts).post(create_workout))
        .route("/users/:username/workouts/summary", get(workout_summary))
}

#[instrument(skip(state, payload))]
pub async fn create_workout(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(payload): Json<LogWorkoutRequest>,
) -> Result<(StatusCode, Json<LogEntry>), (StatusCode, String)> {
    let exercise = match payload.exercise.parse::<Exercise>() {
        Ok(e) => e,
        Err(e) => {
            warn!(error = %e, "rejecting workout log");
            return Err((StatusCode::BAD_REQUEST, "Unknown exercise".into()));
        }
    };

    let reps_or_time = payload.reps_or_time.trim();
    if reps_or_time.chars().count() > MAX_REPS_OR_TIME_LEN {
        return Err((StatusCode::BAD_REQUEST, "reps_or_time too long".into()));
    }

    require_profile(&state, &username).await?;
    let entry = log_workout(&state, &username, exercise, reps_or_time).await?;

    info!(%username, exercise = %entry.exercise, reps_or_time = %entry.reps_or_time, "workout logged");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state))]
pub async fn list_workouts(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<LogEntry>>, (StatusCode, String)> {
    require_profile(&state, &username).await?;
    let entries = state.progress.read(&username).await?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn workout_summary(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<ExerciseCount>>, (StatusCode, String)> {
    require_profile(&state, &username).await?;
    let entries = state.progress.read(&username).await?;
    Ok(Json(exercise_counts(&entries)))
}
