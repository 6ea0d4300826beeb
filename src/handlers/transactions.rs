use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::handlers::current_user;
use crate::models::transaction::Transaction;
use crate::validation::transaction::CreateTransactionRequest;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

/// GET /api/transactions
///
/// Transactions of the current user, newest first.
pub async fn list_transactions_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let user = current_user(&state)?;
    Ok(Json(state.storage.transactions_by_user_id(user.id)))
}

/// POST /api/transactions
///
/// Validates the payload, records the transaction and moves the linked card's
/// balance. Responds 201 with the stored record.
pub async fn create_transaction_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(body) = payload?;
    let new_transaction = CreateTransactionRequest::parse(&body)?;

    let transaction = state.storage.create_transaction(new_transaction);

    Ok((StatusCode::CREATED, Json(transaction)))
}
