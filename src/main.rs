use std::sync::Arc;
use std::time::Duration;

use cineview_api::{
    config::Config,
    db::{self, Cache, CacheWriterHandle, PgCatalog},
    routes::{create_router, AppState},
    services::{
        CatalogProvider, GeminiGenerator, InMemoryCatalog, RecommendationResolver,
        SummaryService, TextGenerator, WatchlistStore,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cineview_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = build_catalog(&config).await?;

    if config.genai_api_key.is_empty() {
        tracing::warn!("GENAI_API_KEY is not set, recommendations will use catalog fallback only");
    }
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiGenerator::new(
        config.genai_api_key.clone(),
        config.genai_api_url.clone(),
        config.genai_model.clone(),
        Duration::from_secs(config.genai_timeout_secs),
    )?);

    let resolver = RecommendationResolver::new(generator.clone())
        .with_target_count(config.recommendation_target_count)
        .with_exclusion(config.recommendation_exclusion);

    let mut summaries = SummaryService::new(generator);
    let mut cache_handle: Option<CacheWriterHandle> = None;
    if let Some(redis_url) = &config.redis_url {
        let (cache, handle) = Cache::new(db::create_redis_client(redis_url)?);
        summaries = summaries.with_cache(cache, config.summary_cache_ttl_secs);
        cache_handle = Some(handle);
        tracing::info!("Summary cache enabled");
    }

    let app = create_router(AppState {
        catalog,
        resolver,
        summaries,
        watchlists: WatchlistStore::new(),
    });

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn build_catalog(config: &Config) -> anyhow::Result<Arc<dyn CatalogProvider>> {
    if let Some(database_url) = &config.database_url {
        let pool = db::create_pool(database_url).await?;
        tracing::info!("Using PostgreSQL catalog");
        return Ok(Arc::new(PgCatalog::new(pool)));
    }

    let catalog = match &config.catalog_seed_file {
        Some(path) => InMemoryCatalog::from_seed_file(path).await?,
        None => InMemoryCatalog::new(),
    };
    tracing::info!("Using in-memory catalog");
    Ok(Arc::new(catalog))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
