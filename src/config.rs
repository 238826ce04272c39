use serde::Deserialize;

use crate::services::recommendations::HistoryExclusion;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL catalog connection URL. Without it the catalog lives in memory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// JSON file used to seed the in-memory catalog
    #[serde(default)]
    pub catalog_seed_file: Option<String>,

    /// Redis connection URL for the summary cache
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Text generation API key
    #[serde(default)]
    pub genai_api_key: String,

    /// Text generation API base URL
    #[serde(default = "default_genai_api_url")]
    pub genai_api_url: String,

    /// Model used for suggestions and summaries
    #[serde(default = "default_genai_model")]
    pub genai_model: String,

    /// Upper bound on a single text generation call
    #[serde(default = "default_genai_timeout_secs")]
    pub genai_timeout_secs: u64,

    /// Desired length of a recommendation list
    #[serde(default = "default_recommendation_target_count")]
    pub recommendation_target_count: usize,

    /// How already-watched titles are kept out of fallback padding
    #[serde(default)]
    pub recommendation_exclusion: HistoryExclusion,

    /// Lifetime of a cached summary in seconds
    #[serde(default = "default_summary_cache_ttl_secs")]
    pub summary_cache_ttl_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_genai_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_genai_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_genai_timeout_secs() -> u64 {
    30
}

fn default_recommendation_target_count() -> usize {
    5
}

fn default_summary_cache_ttl_secs() -> u64 {
    86400 // 1 day
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
