use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};

use pm_provision::ProvisionRequest;

use crate::dto::{LIST_SERVERS_ACTION, PteroRequest, Success, history_entry, present};
use crate::error::ApiError;
use crate::state::AppState;

/// Provision a panel user and server, or list servers when
/// `action == "list_servers"`.
pub async fn handle(
    State(state): State<AppState>,
    payload: Result<Json<PteroRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let (Some(host), Some(key)) = (present(req.host), present(req.key)) else {
        return Err(ApiError::missing_parameters());
    };

    if req.action.as_deref() == Some(LIST_SERVERS_ACTION) {
        let servers = state.provisioner.list_servers(&host, &key).await?;
        tracing::info!(count = servers.len(), "listed panel servers");
        return Ok(Json(Success::new(servers)).into_response());
    }

    let (Some(display_name), Some(plan)) = (present(req.username), req.plan) else {
        return Err(ApiError::missing_parameters());
    };

    let result = state
        .provisioner
        .provision(&ProvisionRequest {
            panel_host: host,
            panel_key: key,
            display_name,
            plan,
        })
        .await?;

    // The caller already has the credentials; a failed history write
    // must not turn a successful provision into an error.
    if let Err(e) = pm_store::prepend_history(&*state.store, history_entry(&result)).await {
        tracing::error!(error = %e, username = %result.login_name, "failed to record history");
    }

    Ok(Json(Success::new(result)).into_response())
}
