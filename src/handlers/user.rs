use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::current_user;
use crate::models::user::User;
use crate::validation::user::RegisterRequest;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// GET /api/user
///
/// The password is never serialized.
pub async fn current_user_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<User>, ApiError> {
    current_user(&state).map(Json)
}

/// POST /api/register
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(body) = payload?;
    let new_user = RegisterRequest::parse(&body)?;

    let username = new_user.username.clone();

    match state.storage.create_user_if_absent(new_user) {
        Some(user) => Ok((StatusCode::CREATED, Json(user))),
        None => {
            warn!(username = %username, "Registration with taken username");
            Err(ApiError::Conflict("Username already exists".to_string()))
        }
    }
}
