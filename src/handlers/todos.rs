use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::models::{CreateTodoPayload, Todo, UpdateTodoPayload};
use crate::state::AppState;
use crate::validation::{parse_create, parse_update};

// A non-numeric id can never match a stored todo
fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

pub async fn list_todos(State(state): State<Arc<AppState>>) -> Json<Vec<Todo>> {
    Json(state.store.list().await)
}

pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTodoPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let Json(payload) = payload?;
    let new_todo = parse_create(payload).inspect_err(|err| {
        tracing::debug!(error = %err, "Rejected create payload");
    })?;

    let todo = state.store.create(new_todo).await;
    tracing::info!(id = todo.id, "Todo created");

    Ok((StatusCode::CREATED, Json(todo)))
}

// Payload is validated before the id is looked up
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoPayload>, JsonRejection>,
) -> Result<Json<Todo>, AppError> {
    let Json(payload) = payload?;
    let patch = parse_update(payload).inspect_err(|err| {
        tracing::debug!(error = %err, "Rejected update payload");
    })?;
    let id = parse_id(&id)?;

    let todo = state.store.update(id, patch).await?;
    tracing::info!(id, completed = todo.completed, "Todo updated");

    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.store.delete(id).await?;
    tracing::info!(id, "Todo deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn not_found_handler() -> AppError {
    AppError::RouteNotFound
}
