use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{error::AppResult, models::CatalogEntry, services::catalog::CatalogProvider};

/// Per-user watchlists of catalog ids, kept in process memory
#[derive(Clone, Default)]
pub struct WatchlistStore {
    inner: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl WatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a title, returning `false` if it was already listed
    pub async fn add(&self, user_id: &str, title_id: &str) -> bool {
        let mut inner = self.inner.write().await;
        let list = inner.entry(user_id.to_string()).or_default();
        if list.iter().any(|id| id == title_id) {
            return false;
        }
        list.push(title_id.to_string());
        tracing::info!(user_id = %user_id, title_id = %title_id, "Added to watchlist");
        true
    }

    /// Removes a title, returning `false` if it was not listed
    pub async fn remove(&self, user_id: &str, title_id: &str) -> bool {
        let mut inner = self.inner.write().await;
        let Some(list) = inner.get_mut(user_id) else {
            return false;
        };
        let before = list.len();
        list.retain(|id| id != title_id);
        let removed = list.len() != before;
        if removed {
            tracing::info!(user_id = %user_id, title_id = %title_id, "Removed from watchlist");
        }
        removed
    }

    pub async fn contains(&self, user_id: &str, title_id: &str) -> bool {
        let inner = self.inner.read().await;
        inner
            .get(user_id)
            .is_some_and(|list| list.iter().any(|id| id == title_id))
    }

    pub async fn list(&self, user_id: &str) -> Vec<String> {
        let inner = self.inner.read().await;
        inner.get(user_id).cloned().unwrap_or_default()
    }

    /// Resolves a watchlist to catalog entries in watchlist order.
    ///
    /// Ids that are no longer in the catalog are skipped.
    pub async fn entries(
        &self,
        user_id: &str,
        catalog: &dyn CatalogProvider,
    ) -> AppResult<Vec<CatalogEntry>> {
        let ids = self.list(user_id).await;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = catalog.list_entries().await?;
        let by_id: HashMap<&str, &CatalogEntry> =
            snapshot.iter().map(|e| (e.id.as_str(), e)).collect();

        Ok(ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).map(|e| (*e).clone()))
            .collect())
    }
}
