use axum::{Json, response::IntoResponse};
use chrono::SecondsFormat;

// health handler
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }))
}
