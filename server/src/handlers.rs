use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use todo_core::Item;

use crate::{
    error::ApiError,
    models::{CreateTodo, HealthResponse, UpdateTodo},
    AppState,
};

const TITLE_REQUIRED: &str = "invalid body: title required";

/// Decodes a JSON object body regardless of the request's content type.
/// Arrays are rejected even when the target struct could be read from one.
fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, String> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("expected a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.list())
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let input: CreateTodo = decode_object(&body).map_err(|err| {
        tracing::debug!("rejected create body: {}", err);
        ApiError::BadRequest(TITLE_REQUIRED.to_string())
    })?;
    if input.title.is_empty() {
        return Err(ApiError::BadRequest(TITLE_REQUIRED.to_string()));
    }

    let item = state.store.create(input.title);
    tracing::debug!(id = item.id, "todo created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.store.get(id)?))
}

pub async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> Result<Json<Item>, ApiError> {
    let Path(id) = id?;
    let input: UpdateTodo = decode_object(&body)
        .map_err(|err| ApiError::BadRequest(format!("invalid body: {err}")))?;
    if input.title.as_deref() == Some("") {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let item = state.store.update(id, input.title, input.done)?;
    tracing::debug!(id, "todo updated");
    Ok(Json(item))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.store.delete(id)?;
    tracing::debug!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        items: state.store.len(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("endpoint not found".to_string())
}
