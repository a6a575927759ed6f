use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("todo not found")]
    NotFound,

    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("request body exceeds the configured limit")]
    PayloadTooLarge,

    #[error("route not found")]
    RouteNotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::MalformedBody(rejection.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(details) => json!({
                "error": "Validation failed",
                "details": details,
            }),
            AppError::NotFound => json!({ "error": "Todo not found" }),
            AppError::RateLimited { retry_after_secs } => json!({
                "error": "Too many requests",
                "message": "Too many requests from this client, please try again later",
                "retryAfter": retry_after_secs,
            }),
            AppError::MalformedBody(reason) => json!({
                "error": "Malformed JSON body",
                "details": [reason],
            }),
            AppError::PayloadTooLarge => json!({ "error": "Payload too large" }),
            AppError::RouteNotFound => json!({ "error": "Route not found" }),
            AppError::Internal(reason) => {
                tracing::error!(error = %reason, "Unhandled request failure");
                json!({ "error": "Internal server error" })
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let AppError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}
