use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        CatalogEntry, WatchlistAddResponse, WatchlistItemResponse, WatchlistRemoveResponse,
        WatchlistResponse,
    },
    routes::AppState,
};

pub async fn list_ids(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<WatchlistResponse> {
    let title_ids = state.watchlists.list(&user_id).await;
    Json(WatchlistResponse { title_ids })
}

pub async fn list_titles(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let entries = state
        .watchlists
        .entries(&user_id, state.catalog.as_ref())
        .await?;
    Ok(Json(entries))
}

/// Reports whether a title is on the user's watchlist
pub async fn check(
    State(state): State<Arc<AppState>>,
    Path((user_id, title_id)): Path<(String, String)>,
) -> Json<WatchlistItemResponse> {
    let in_watchlist = state.watchlists.contains(&user_id, &title_id).await;
    Json(WatchlistItemResponse { in_watchlist })
}

/// Adds a catalog title to the user's watchlist
pub async fn add(
    State(state): State<Arc<AppState>>,
    Path((user_id, title_id)): Path<(String, String)>,
) -> AppResult<Json<WatchlistAddResponse>> {
    if state.catalog.get_entry(&title_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Title {} not found", title_id)));
    }

    let added = state.watchlists.add(&user_id, &title_id).await;
    Ok(Json(WatchlistAddResponse { added }))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path((user_id, title_id)): Path<(String, String)>,
) -> Json<WatchlistRemoveResponse> {
    let removed = state.watchlists.remove(&user_id, &title_id).await;
    Json(WatchlistRemoveResponse { removed })
}
