pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod state;
pub mod store;
pub mod validation;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_todo, delete_todo, health_handler, list_todos, metrics_handler, not_found_handler,
    update_todo,
};
use crate::middleware::{cors_layer, rate_limit_middleware, security_headers};
use crate::state::AppState;

// Layers listed last run first: trace, security, rate limit, cors
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = state.config.body_limit;

    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
