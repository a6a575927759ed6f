use axum::extract::State;
use prometheus::{Encoder, TextEncoder};
use std::sync::Arc;

use crate::error::AppError;
use crate::metrics::instance_families;
use crate::state::AppState;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<String, AppError> {
    let encoder = TextEncoder::new();
    let mut metric_families = prometheus::gather();
    metric_families.extend(
        instance_families(state.store.len().await)
            .map_err(|e| AppError::Internal(format!("metrics collection failed: {e}")))?,
    );

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AppError::Internal(format!("metrics encoding failed: {e}")))?;
    String::from_utf8(buffer)
        .map_err(|e| AppError::Internal(format!("metrics output was not UTF-8: {e}")))
}
