use axum::http::StatusCode;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::error::StoreError;
use crate::profiles::repo_types::UserProfile;
use crate::state::AppState;

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.-]{1,64}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

/// Stores the profile and opens an empty progress log for the user.
pub async fn register_user(
    state: &AppState,
    username: &str,
    profile: UserProfile,
) -> Result<(), StoreError> {
    state.profiles.register(username, profile).await?;
    state.progress.init_user(username).await?;
    Ok(())
}

/// Looks up a profile, turning a miss into a 404.
pub async fn require_profile(
    state: &AppState,
    username: &str,
) -> Result<UserProfile, (StatusCode, String)> {
    match state.profiles.lookup(username).await? {
        Some(p) => Ok(p),
        None => {
            warn!(%username, "unknown user");
            Err(StoreError::UnknownUser(username.to_string()).into())
        }
    }
}
