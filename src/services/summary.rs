use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::AppResult,
    models::SummaryRequest,
    services::providers::TextGenerator,
};

pub const MISSING_TITLE_MESSAGE: &str = "Please provide a title to generate a summary.";
pub const UNAVAILABLE_MESSAGE: &str =
    "Could not generate summary. The AI model may be unavailable. Please try again later.";

/// Generates AI summaries for titles, with optional Redis caching
///
/// Always yields displayable text: a missing title or a failing model produce a
/// user-facing message instead of an error.
pub struct SummaryService {
    generator: Arc<dyn TextGenerator>,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl SummaryService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            cache: None,
            cache_ttl: 0,
        }
    }

    pub fn with_cache(mut self, cache: Cache, ttl: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    pub async fn generate_summary(&self, request: &SummaryRequest) -> String {
        let request = request.normalized();
        if request.title.is_empty() {
            return MISSING_TITLE_MESSAGE.to_string();
        }

        let result = match &self.cache {
            Some(cache) => self.summarize_cached(cache, &request).await,
            None => self.generator.summarize(&request).await,
        };

        match result {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(
                    provider = self.generator.name(),
                    title = %request.title,
                    error = %e,
                    "Summary generation failed"
                );
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    async fn summarize_cached(
        &self,
        cache: &Cache,
        request: &SummaryRequest,
    ) -> AppResult<String> {
        cached!(
            cache,
            CacheKey::Summary(request.clone()),
            self.cache_ttl,
            self.generator.summarize(request)
        )
    }
}
