use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;

use pm_provision::ConfigEvent;
use pm_store::models::PanelConfig;

use crate::dto::{Success, client_ip};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_config(
    State(state): State<AppState>,
) -> Result<Json<Success<Option<PanelConfig>>>, ApiError> {
    let config = state.store.load_config().await?;
    Ok(Json(Success::new(config)))
}

pub async fn save_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PanelConfig>, JsonRejection>,
) -> Result<Json<Success<PanelConfig>>, ApiError> {
    let Json(config) = payload?;
    if !config.is_configured() {
        return Err(ApiError::missing_parameters());
    }

    let config = PanelConfig {
        domain: config.domain.trim().to_string(),
        plta: config.plta.trim().to_string(),
    };
    state.store.save_config(&config).await?;
    tracing::info!(domain = %config.domain, "panel configuration saved");

    state.notifier.notify(ConfigEvent {
        domain: config.domain.clone(),
        ip: client_ip(&headers),
    });

    Ok(Json(Success::new(config)))
}
