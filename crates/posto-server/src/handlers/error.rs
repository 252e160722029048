//! Mapping of failures to HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use posto_core::PostoError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    /// Logged in full, answered with a generic message.
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn from_service(context: &'static str, err: PostoError) -> Self {
        match err {
            PostoError::Business(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(anyhow::Error::new(other).context(context)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "ufo not found".to_string(),
            ),
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}
