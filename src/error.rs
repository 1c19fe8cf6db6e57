use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

/// Failures raised by the profile and progress stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("username already registered: {0}")]
    AlreadyExists(String),
    #[error("unknown user: {0}")]
    UnknownUser(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(e.into())
    }
}

/// Failures of the external text-generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generator request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generator returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generator returned no text")]
    Empty,
    #[error("generator timed out after {0:?}")]
    Timeout(Duration),
}

impl From<StoreError> for (StatusCode, String) {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists(_) => (StatusCode::CONFLICT, "Username already registered".into()),
            StoreError::UnknownUser(_) => (StatusCode::NOT_FOUND, "User not found".into()),
            StoreError::Backend(e) => {
                error!(error = %e, "store backend failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}
