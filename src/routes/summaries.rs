use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    middleware::RequestId,
    models::{SummaryRequest, SummaryResponse},
    routes::AppState,
};

/// Handler for AI summary endpoint
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SummaryRequest>,
) -> Json<SummaryResponse> {
    tracing::info!(request_id = %request_id, title = %request.title, "Processing summary request");

    let summary = state.summaries.generate_summary(&request).await;
    Json(SummaryResponse { summary })
}
