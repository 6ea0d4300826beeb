use crate::core::state::AppState;
use crate::models::guide::Guide;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /api/guides
///
/// Public reference content, no user context needed.
pub async fn guides_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Guide>> {
    Json(state.storage.all_guides())
}
