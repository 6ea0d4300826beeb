// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{budget, cards, fallback, guides, health, transactions, user};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))

        // Current user and registration
        .route("/api/user", get(user::current_user_handler))
        .route("/api/register", post(user::register_handler))

        // Cards
        .route("/api/cards", get(cards::list_cards_handler))
        .route("/api/cards/{id}", get(cards::get_card_handler))
        .route("/api/cards/{id}/transactions", get(cards::card_transactions_handler))
        .route("/api/cards/{id}/status", post(cards::card_status_handler))

        // Budget, transactions, guides
        .route("/api/budget", get(budget::budget_handler))
        .route(
            "/api/transactions",
            get(transactions::list_transactions_handler)
                .post(transactions::create_transaction_handler),
        )
        .route("/api/guides", get(guides::guides_handler))

        // JSON 404 for everything else
        .fallback(fallback::fallback_handler)

        .with_state(state)
}
