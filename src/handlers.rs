//! Resource handlers: resolve the variant from the path segment, hand off to
//! the engine. Wire shape: bare JSON array for list, bare document for get,
//! `{"id": ...}` for create, empty 200 for delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::engine::Engine;
use crate::error::AppError;
use crate::schema::ResourceSchema;
use crate::state::AppState;

fn resolve<'a>(state: &'a AppState, path_segment: &str) -> Result<&'a ResourceSchema, AppError> {
    state
        .model
        .schema_by_path(path_segment)
        .ok_or_else(|| AppError::NotFound(path_segment.to_string()))
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let schema = resolve(&state, &path_segment)?;
    let docs = Engine::list(state.store.as_ref(), schema, &params).await?;
    Ok(Json(docs))
}

pub async fn get(
    State(state): State<AppState>,
    Path((path_segment, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let schema = resolve(&state, &path_segment)?;
    let doc = Engine::get(state.store.as_ref(), schema, &id).await?;
    Ok(Json(doc))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let schema = resolve(&state, &path_segment)?;
    let id = Engine::create(state.store.as_ref(), schema, body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let schema = resolve(&state, &path_segment)?;
    Engine::delete(state.store.as_ref(), schema, &id).await?;
    Ok(StatusCode::OK)
}
