use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::current_user;
use crate::models::api::{CardStatusRequest, CardStatusResponse};
use crate::models::card::Card;
use crate::models::transaction::Transaction;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// GET /api/cards
///
/// Cards of the current user.
pub async fn list_cards_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let user = current_user(&state)?;
    Ok(Json(state.storage.cards_by_user_id(user.id)))
}

/// GET /api/cards/{id}
pub async fn get_card_handler(
    State(state): State<Arc<AppState>>,
    card_id: Result<Path<u32>, PathRejection>,
) -> Result<Json<Card>, ApiError> {
    let Path(card_id) = card_id?;

    state
        .storage
        .get_card(card_id)
        .map(Json)
        .ok_or(ApiError::NotFound("Card"))
}

/// GET /api/cards/{id}/transactions
///
/// Newest first. A card with no history yields an empty list.
pub async fn card_transactions_handler(
    State(state): State<Arc<AppState>>,
    card_id: Result<Path<u32>, PathRejection>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let Path(card_id) = card_id?;

    let transactions = state.storage.transactions_by_card_id(card_id);
    debug!(card_id, count = transactions.len(), "Card transactions listed");
    Ok(Json(transactions))
}

/// POST /api/cards/{id}/status
///
/// Blocks or unblocks the card and persists the new status.
pub async fn card_status_handler(
    State(state): State<Arc<AppState>>,
    card_id: Result<Path<u32>, PathRejection>,
    payload: Result<Json<CardStatusRequest>, JsonRejection>,
) -> Result<Json<CardStatusResponse>, ApiError> {
    let Path(card_id) = card_id?;
    let Json(request) = payload?;

    let card = state
        .storage
        .set_card_status(card_id, request.is_active)
        .ok_or(ApiError::NotFound("Card"))?;

    Ok(Json(CardStatusResponse {
        success: true,
        card_id: card.id,
        is_active: card.is_active,
    }))
}
