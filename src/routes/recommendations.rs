use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    middleware::RequestId,
    models::{CatalogEntry, RecommendationRequest},
    routes::AppState,
    services::get_recommendations,
};

/// Handler for recommendations endpoint
///
/// Always answers 200; an empty list means no recommendations are available.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> Json<Vec<CatalogEntry>> {
    tracing::info!(
        request_id = %request_id,
        history_len = request.viewing_history.len(),
        target_count = state.resolver.target_count(),
        "Processing recommendation request"
    );

    let recommendations = get_recommendations(
        state.catalog.clone(),
        &state.resolver,
        &request.viewing_history,
    )
    .await;

    tracing::info!(
        request_id = %request_id,
        returned = recommendations.len(),
        "Recommendations completed"
    );

    Json(recommendations)
}
