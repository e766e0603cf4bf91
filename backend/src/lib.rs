mod api;
mod config;
pub mod lobby;

pub use api::{ApiError, AppState, messages};
pub use config::Config;

use axum::Router;
use lobby::{LobbyManager, LobbyRegistry};
use std::sync::Arc;

/// Router over a fresh, private registry
pub fn app() -> Router {
    app_with_registry(Arc::new(LobbyRegistry::new()))
}

pub fn app_with_registry(registry: Arc<LobbyRegistry>) -> Router {
    let state = AppState {
        lobbies: Arc::new(LobbyManager::new(registry)),
    };
    api::router(state)
}
