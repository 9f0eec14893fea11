use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipebox_core::StoreError;
use serde::Serialize;

/// Error body returned by every failing endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

/// Errors surfaced by the document service handlers.
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    BadRequest(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Store(e) => write!(f, "{}", e),
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Store(StoreError::NotFound { .. }) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Store(StoreError::InvalidName(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_name")
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_body"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        (
            status,
            Json(ErrorBody {
                error,
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
