use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use santara_core::ErrorResponse;
use santara_search::SearchError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("rate limit exceeded")]
    RateLimited,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category, message) = match &self {
            ApiError::Search(err @ SearchError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "Validation error", err.to_string())
            }
            ApiError::Search(err @ SearchError::Cancelled) => {
                (StatusCode::GATEWAY_TIMEOUT, "Request timeout", err.to_string())
            }
            ApiError::Search(err) => {
                tracing::error!(%err, "search failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    err.to_string(),
                )
            }
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded",
                "Rate limit exceeded. Please try again later.".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: category.to_string(),
            message: Some(message),
            code: status.as_u16(),
        });
        (status, body).into_response()
    }
}
