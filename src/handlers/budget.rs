use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::current_user;
use crate::models::budget::BudgetOverview;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /api/budget
pub async fn budget_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BudgetOverview>, ApiError> {
    let user = current_user(&state)?;

    state
        .storage
        .budget_by_user_id(user.id)
        .map(Json)
        .ok_or(ApiError::NotFound("Budget"))
}
