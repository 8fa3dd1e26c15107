use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode};

use pm_provision::ConfigEvent;

use crate::dto::{NotifyRequest, Success, client_ip, present};
use crate::error::ApiError;
use crate::state::AppState;

/// Relay a configuration event. Delivery failures never reach the caller;
/// only an unreadable body is rejected.
pub async fn notify(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NotifyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Success<()>>), ApiError> {
    let Json(req) = payload?;
    match present(req.domain) {
        Some(domain) => state.notifier.notify(ConfigEvent {
            domain,
            ip: present(req.ip).or_else(|| client_ip(&headers)),
        }),
        None => tracing::debug!("notify request without domain, ignoring"),
    }

    Ok((StatusCode::ACCEPTED, Json(Success::new(()))))
}
