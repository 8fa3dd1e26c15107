use axum::Json;
use axum::extract::{Path, State};

use pm_store::models::HistoryEntry;

use crate::dto::Success;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Success<Vec<HistoryEntry>>>, ApiError> {
    let history = state.store.load_history().await?;
    Ok(Json(Success::new(history)))
}

pub async fn delete_history(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Success<Vec<HistoryEntry>>>, ApiError> {
    let history = pm_store::remove_history(&*state.store, index).await?;
    Ok(Json(Success::new(history)))
}
