use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    plans::{
        catalog::{Exercise, ALL_EXERCISES},
        dto::{AnonymousPlanRequest, PlanQuery, PlanResponse},
        services::{table_plan, PlanStrategy},
    },
    profiles::services::require_profile,
    state::AppState,
};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/exercises", get(list_exercises))
        .route("/plans", post(anonymous_plan))
        .route("/users/:username/plan", get(user_plan))
}

pub async fn list_exercises() -> Json<&'static [Exercise]> {
    Json(ALL_EXERCISES)
}

#[instrument(skip(state))]
pub async fn user_plan(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(q): Query<PlanQuery>,
) -> Result<Json<PlanResponse>, (StatusCode, String)> {
    let profile = require_profile(&state, &username).await?;
    let (strategy, exercises) = state.plans.generate(&profile, q.strategy);
    debug!(%username, %strategy, count = exercises.len(), "plan generated");
    Ok(Json(PlanResponse { strategy, exercises }))
}

#[instrument]
pub async fn anonymous_plan(Json(payload): Json<AnonymousPlanRequest>) -> Json<PlanResponse> {
    let exercises = table_plan(payload.goal, payload.equipment, &mut rand::thread_rng());
    debug!(goal = %payload.goal, experience = %payload.experience, count = exercises.len(), "anonymous plan generated");
    Json(PlanResponse {
        strategy: PlanStrategy::Table,
        exercises,
    })
}
