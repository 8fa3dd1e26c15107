pub mod config;
pub mod history;
pub mod notify;
pub mod plans;
pub mod ptero;

use axum::Router;
use axum::routing::{delete, get, post};

use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        // Provisioning + inventory
        .route("/ptero", post(ptero::handle))
        // Side-channel
        .route("/notify", post(notify::notify))
        // Local state
        .route("/config", get(config::get_config).put(config::save_config))
        .route("/history", get(history::list_history))
        .route("/history/{index}", delete(history::delete_history))
        // Catalog
        .route("/plans", get(plans::list_plans));

    Router::new().nest("/api", api).with_state(state)
}
