use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;

use crate::{
    models::CatalogEntry,
    services::{
        catalog::CatalogProvider,
        matcher::{match_titles, normalize_fragments, normalize_title},
        providers::TextGenerator,
    },
};

pub const DEFAULT_TARGET_COUNT: usize = 5;

/// How fallback padding decides a catalog entry was already watched
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryExclusion {
    /// The entry's title occurs verbatim (case-sensitive) anywhere in the raw history
    #[default]
    Substring,
    /// The entry's normalized title equals one of the normalized history fragments
    ExactTitle,
}

impl HistoryExclusion {
    fn excluder<'h>(self, viewing_history: &'h str) -> Box<dyn Fn(&CatalogEntry) -> bool + 'h> {
        match self {
            HistoryExclusion::Substring => {
                Box::new(move |entry: &CatalogEntry| {
                    viewing_history.contains(entry.title.as_str())
                })
            }
            HistoryExclusion::ExactTitle => {
                let watched = normalize_fragments(viewing_history);
                Box::new(move |entry: &CatalogEntry| {
                    watched.contains(&normalize_title(&entry.title))
                })
            }
        }
    }
}

/// Builds the final recommendation list from a suggestion string.
///
/// Matched entries come first in catalog order. If there are fewer than `target_count`
/// of them, the list is padded with the earliest catalog entries that are neither
/// matched already nor excluded by the viewing history. Matches are never truncated.
pub fn assemble_recommendations(
    viewing_history: &str,
    suggestions: &str,
    catalog: &[CatalogEntry],
    target_count: usize,
    exclusion: HistoryExclusion,
) -> Vec<CatalogEntry> {
    let matched = match_titles(suggestions, catalog);
    let mut seen_ids: HashSet<&str> = matched.iter().copied().map(|e| e.id.as_str()).collect();
    let mut result: Vec<CatalogEntry> = matched.into_iter().cloned().collect();

    if result.len() >= target_count {
        return result;
    }

    let shortfall = target_count - result.len();
    let already_watched = exclusion.excluder(viewing_history);
    let fallback: Vec<&CatalogEntry> = catalog
        .iter()
        .filter(|&entry| !already_watched(entry))
        .filter(|&entry| seen_ids.insert(entry.id.as_str()))
        .take(shortfall)
        .collect();

    result.extend(fallback.into_iter().cloned());
    result
}

/// Turns a viewing history into a bounded list of catalog entries.
///
/// The text generator is only a hint: when it fails or answers with titles the catalog
/// does not hold, the list is filled from the catalog instead.
pub struct RecommendationResolver {
    generator: Arc<dyn TextGenerator>,
    target_count: usize,
    exclusion: HistoryExclusion,
}

impl RecommendationResolver {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            target_count: DEFAULT_TARGET_COUNT,
            exclusion: HistoryExclusion::default(),
        }
    }

    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    pub fn with_exclusion(mut self, exclusion: HistoryExclusion) -> Self {
        self.exclusion = exclusion;
        self
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Resolves recommendations against a catalog snapshot
    pub async fn resolve(
        &self,
        viewing_history: &str,
        catalog: &[CatalogEntry],
    ) -> Vec<CatalogEntry> {
        let suggestions = match self.generator.suggest_titles(viewing_history).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!(
                    provider = self.generator.name(),
                    error = %e,
                    "Title suggestion failed, using catalog fallback"
                );
                String::new()
            }
        };

        let recommendations = assemble_recommendations(
            viewing_history,
            &suggestions,
            catalog,
            self.target_count,
            self.exclusion,
        );

        tracing::info!(
            catalog_size = catalog.len(),
            target_count = self.target_count,
            returned = recommendations.len(),
            "Recommendations resolved"
        );

        recommendations
    }
}

/// Fetches a catalog snapshot and resolves recommendations against it.
///
/// Never fails: if the catalog cannot be read the result is empty.
pub async fn get_recommendations(
    catalog: Arc<dyn CatalogProvider>,
    resolver: &RecommendationResolver,
    viewing_history: &str,
) -> Vec<CatalogEntry> {
    let snapshot = match catalog.list_entries().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog snapshot");
            return Vec::new();
        }
    };

    resolver.resolve(viewing_history, &snapshot).await
}
