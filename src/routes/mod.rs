use axum::{
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{CatalogProvider, RecommendationResolver, SummaryService, WatchlistStore},
};

pub mod recommendations;
pub mod summaries;
pub mod titles;
pub mod watchlist;

/// Shared handles used by every handler
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub resolver: RecommendationResolver,
    pub summaries: SummaryService,
    pub watchlists: WatchlistStore,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/summaries", post(summaries::summarize))
        .route("/titles", get(titles::list).post(titles::create))
        .route("/titles/:id", get(titles::get).put(titles::update))
        .route("/watchlist/:user_id", get(watchlist::list_ids))
        .route("/watchlist/:user_id/titles", get(watchlist::list_titles))
        .route(
            "/watchlist/:user_id/items/:title_id",
            get(watchlist::check)
                .put(watchlist::add)
                .delete(watchlist::remove),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
