pub mod catalog;
pub mod matcher;
pub mod providers;
pub mod recommendations;
pub mod summary;
pub mod video;
pub mod watchlist;

pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use providers::{GeminiGenerator, TextGenerator};
pub use recommendations::{get_recommendations, HistoryExclusion, RecommendationResolver};
pub use summary::SummaryService;
pub use watchlist::WatchlistStore;
