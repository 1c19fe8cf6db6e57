use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::StoreError,
    profiles::{
        dto::{ProfileResponse, RegisterRequest},
        repo_types::{MAX_AGE, MIN_AGE},
        services::{is_valid_username, register_user, require_profile},
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/:username", get(get_profile))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), (StatusCode, String)> {
    payload.username = payload.username.trim().to_string();

    if !is_valid_username(&payload.username) {
        warn!(username = %payload.username, "invalid username");
        return Err((StatusCode::BAD_REQUEST, "Invalid username".into()));
    }

    let profile = payload.profile();
    if !profile.age_in_range() {
        warn!(age = profile.age, "age out of range");
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Age must be between {MIN_AGE} and {MAX_AGE}"),
        ));
    }

    match register_user(&state, &payload.username, profile).await {
        Ok(()) => {}
        Err(e @ StoreError::AlreadyExists(_)) => {
            warn!(username = %payload.username, "username already registered");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    }

    info!(username = %payload.username, goal = %profile.goal, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse {
            username: payload.username,
            profile,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = require_profile(&state, &username).await?;
    Ok(Json(ProfileResponse { username, profile }))
}
