use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pm_provision::ProvisionError;

pub const MISSING_PARAMETERS: &str = "Missing parameters";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error("state error: {0}")]
    Store(#[from] pm_store::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn missing_parameters() -> Self {
        Self::BadRequest(MISSING_PARAMETERS.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Provision(ProvisionError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Provision(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(pm_store::Error::IndexOutOfRange { .. }) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({ "message": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
