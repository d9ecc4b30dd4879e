use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use todovault_core::storage::Page;
use todovault_core::todo::{NewTodo, Todo, TodoPatch};

use crate::state::AppState;

use super::AppError;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    page: usize,
}

fn default_page() -> usize {
    1
}

/// List todos page by page (GET /todos?page=N).
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page>, AppError> {
    let page = state.store.get_page(query.page, state.page_size).await?;
    Ok(Json(page))
}

/// Get a single todo by ID (GET /todos/{id}).
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, AppError> {
    let todo = state.store.fetch_by_id(&id).await?;
    Ok(Json(todo))
}

/// Create a new todo (POST /todos).
pub async fn create_todo(
    State(state): State<AppState>,
    Json(payload): Json<NewTodo>,
) -> Result<impl IntoResponse, AppError> {
    let todo = state.store.add(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Partially update a todo by ID (PUT /todos/{id}).
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<Todo>, AppError> {
    let todo = state.store.update(&id, patch).await?;
    Ok(Json(todo))
}

/// Delete a todo by ID (DELETE /todos/{id}).
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.delete(&id).await?;
    Ok(Json(serde_json::json!({
        "message": "Todo successfully deleted"
    })))
}
