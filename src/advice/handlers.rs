use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    advice::services::AdviceSource,
    profiles::services::require_profile,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AdviceQuery {
    pub exercise: String,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    pub exercise: String,
    pub tip: String,
    pub source: AdviceSource,
}

pub fn advice_routes() -> Router<AppState> {
    Router::new()
        .route("/advice", get(generic_advice))
        .route("/users/:username/advice", get(user_advice))
}

#[instrument(skip(state))]
pub async fn generic_advice(
    State(state): State<AppState>,
    Query(q): Query<AdviceQuery>,
) -> Json<AdviceResponse> {
    let advice = state.advice.advise(&q.exercise, None).await;
    Json(AdviceResponse {
        exercise: q.exercise,
        tip: advice.tip,
        source: advice.source,
    })
}

#[instrument(skip(state))]
pub async fn user_advice(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(q): Query<AdviceQuery>,
) -> Result<Json<AdviceResponse>, (StatusCode, String)> {
    let profile = require_profile(&state, &username).await?;
    let advice = state.advice.advise(&q.exercise, Some(&profile)).await;
    info!(%username, exercise = %q.exercise, source = ?advice.source, "advice served");
    Ok(Json(AdviceResponse {
        exercise: q.exercise,
        tip: advice.tip,
        source: advice.source,
    }))
}
