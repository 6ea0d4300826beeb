pub mod budget;
pub mod cards;
pub mod fallback;
pub mod guides;
pub mod health;
pub mod transactions;
pub mod user;

use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::user::User;

/// The dashboard always acts as the configured demo user
pub(crate) fn current_user(state: &AppState) -> Result<User, ApiError> {
    state
        .storage
        .get_user_by_username(&state.config.demo.username)
        .ok_or(ApiError::NotFound("User"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::config::{Config, DemoConfig, LoggingConfig, ServerConfig};
    use crate::core::startup::build_storage;
    use crate::core::state::AppState;
    use axum::body::Body;
    use axum::response::Response;
    use http_body_util::BodyExt;
    use std::sync::Arc;

    pub fn create_test_config(seed: bool) -> Config {
        Config {
            server: ServerConfig {
                port: 5000,
                num_threads: 2,
            },
            logging: LoggingConfig::default(),
            demo: DemoConfig {
                username: "demo".to_string(),
                seed,
            },
        }
    }

    /// Fresh seeded store per call
    pub fn create_test_state() -> Arc<AppState> {
        let config = create_test_config(true);
        let storage = build_storage(&config.demo).unwrap();
        Arc::new(AppState::new(config, storage))
    }

    /// Store without the demo dataset
    pub fn create_empty_state() -> Arc<AppState> {
        let config = create_test_config(false);
        let storage = build_storage(&config.demo).unwrap();
        Arc::new(AppState::new(config, storage))
    }

    pub async fn json_body(response: Response) -> serde_json::Value {
        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
