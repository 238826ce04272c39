use serde::{Deserialize, Serialize};

mod catalog;
mod summary;

pub use catalog::{CatalogEntry, NewCatalogEntry};
pub use summary::{SummaryRequest, SummaryResponse};

/// Request body for the recommendations endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Comma separated titles the user has watched
    #[serde(default)]
    pub viewing_history: String,
}

/// Ids currently on a user's watchlist, in the order they were added
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistResponse {
    pub title_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistAddResponse {
    pub added: bool,
}

#[derive(Debug, Serialize)]
pub struct WatchlistRemoveResponse {
    pub removed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItemResponse {
    pub in_watchlist: bool,
}
