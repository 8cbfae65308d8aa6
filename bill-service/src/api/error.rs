use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// What a caller can be told about a failed lookup.
///
/// Every upstream or parsing fault collapses into `Upstream`; the cause is
/// logged where it happens and never reaches the response body.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("reference number is required")]
    MissingReference,
    #[error("bill not found for this reference number")]
    NotFound,
    #[error("connection failed")]
    Upstream,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: bool,
    error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingReference => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorBody {
                status: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
