use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, NewCatalogEntry},
    routes::AppState,
};

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<CatalogEntry>>> {
    let entries = state.catalog.list_entries().await?;
    Ok(Json(entries))
}

pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<CatalogEntry>> {
    state
        .catalog
        .get_entry(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Title {} not found", id)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(fields): Json<NewCatalogEntry>,
) -> AppResult<(StatusCode, Json<CatalogEntry>)> {
    let entry = state.catalog.insert_entry(fields).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(fields): Json<NewCatalogEntry>,
) -> AppResult<Json<CatalogEntry>> {
    let entry = state.catalog.update_entry(&id, fields).await?;
    Ok(Json(entry))
}
