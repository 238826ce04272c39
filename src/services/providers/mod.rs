/// Text generation provider abstraction
///
/// Recommendations and summaries both lean on a hosted text model. The model is
/// hidden behind [`TextGenerator`] so callers can treat its output as plain,
/// untrusted text and swap the backing service without touching the resolver.
use crate::{error::AppResult, models::SummaryRequest};

pub mod gemini;

pub use gemini::GeminiGenerator;

/// Trait for text generation providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Suggests titles the viewer might enjoy
    ///
    /// Returns a comma separated list exactly as the model produced it. Callers must not
    /// assume the titles exist in the catalog or are well formed.
    async fn suggest_titles(&self, viewing_history: &str) -> AppResult<String>;

    /// Writes a short summary for a movie or series
    async fn summarize(&self, request: &SummaryRequest) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
