// Application state (AppState)

use crate::core::config::Config;
use crate::stores::storage::Storage;
use std::sync::Arc;

/// Shared application state
///
/// Constructed once in main and handed to every handler, so tests can build an
/// isolated store per case.
#[derive(Clone)]
pub struct AppState {
    /// In-memory data store
    pub storage: Arc<Storage>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, storage: Storage) -> Self {
        Self {
            storage: Arc::new(storage),
            config: Arc::new(config),
        }
    }
}
