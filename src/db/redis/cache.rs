use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::error::AppResult;
use crate::models::SummaryRequest;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Generated summary for a (normalized) summary request
    Summary(SummaryRequest),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Summary(request) => write!(
                f,
                "summary:{}|{}|{}",
                key_part(&request.title),
                key_part(request.genre.as_deref().unwrap_or("")),
                key_part(request.keywords.as_deref().unwrap_or(""))
            ),
        }
    }
}

/// Lowercases a key field and escapes the `|` separator so fields cannot run together
fn key_part(value: &str) -> String {
    value
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('|', "\\|")
}

/// Creates a Redis client for caching
///
/// Only parses the URL; connections are opened lazily per operation.
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Pending write handed to the background writer
struct PendingWrite {
    key: String,
    value: String,
    ttl: u64,
}

/// Redis backed cache with fire-and-forget writes
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
    write_tx: mpsc::UnboundedSender<PendingWrite>,
}

/// Stops the background writer once queued writes are flushed
pub struct CacheWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl CacheWriterHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("Cache writer shutdown requested");
    }
}

impl Cache {
    /// Creates the cache and spawns its writer task
    pub fn new(redis_client: Client) -> (Self, CacheWriterHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(Self::run_writer(redis_client.clone(), write_rx, shutdown_rx));

        (
            Self {
                redis_client,
                write_tx,
            },
            CacheWriterHandle { shutdown_tx },
        )
    }

    async fn run_writer(
        client: Client,
        mut write_rx: mpsc::UnboundedReceiver<PendingWrite>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!("Cache writer started");

        loop {
            tokio::select! {
                Some(write) = write_rx.recv() => {
                    Self::store(&client, write).await;
                }
                _ = shutdown_rx.recv() => {
                    write_rx.close();
                    let mut flushed = 0usize;
                    while let Some(write) = write_rx.recv().await {
                        Self::store(&client, write).await;
                        flushed += 1;
                    }
                    tracing::info!(flushed, "Cache writer stopped");
                    break;
                }
            }
        }
    }

    async fn store(client: &Client, write: PendingWrite) {
        let PendingWrite { key, value, ttl } = write;

        let result: AppResult<()> = async {
            let mut conn = client.get_multiplexed_async_connection().await?;
            let _: () = conn.set_ex(&key, value, ttl).await?;
            Ok::<(), AppError>(())
        }
        .await;

        if let Err(e) = result {
            tracing::error!(key = %key, error = %e, "Failed to write to Redis cache");
        }
    }

    /// Looks up and deserializes a cached value
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(key.to_string()).await?;

        cached
            .map(|json| {
                serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })
            })
            .transpose()
    }

    /// Queues a value for writing without waiting on Redis
    pub fn set_in_background<T: serde::Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let value = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Cache serialization error");
                return;
            }
        };

        let write = PendingWrite {
            key: key.to_string(),
            value,
            ttl,
        };

        if self.write_tx.send(write).is_err() {
            tracing::warn!(key = %key, "Cache writer is gone, dropping write");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_key(title: &str, genre: Option<&str>, keywords: Option<&str>) -> CacheKey {
        CacheKey::Summary(SummaryRequest {
            title: title.to_string(),
            genre: genre.map(str::to_string),
            keywords: keywords.map(str::to_string),
        })
    }

    #[test]
    fn test_summary_key_is_lowercased() {
        let key = summary_key("Inception", Some("Sci-Fi"), Some("Dreams"));
        assert_eq!(key.to_string(), "summary:inception|sci-fi|dreams");
    }

    #[test]
    fn test_summary_key_missing_fields() {
        let key = summary_key("The Matrix", None, None);
        assert_eq!(key.to_string(), "summary:the matrix||");
    }

    #[test]
    fn test_summary_keys_differ_by_genre() {
        let plain = summary_key("Heat", None, None);
        let crime = summary_key("Heat", Some("Crime"), None);
        assert_ne!(plain.to_string(), crime.to_string());
    }

    #[test]
    fn test_summary_key_escapes_separator() {
        let first = summary_key("a|b", Some("c"), None);
        let second = summary_key("a", Some("b|c"), None);

        assert_ne!(first.to_string(), second.to_string());
        assert_eq!(first.to_string(), "summary:a\\|b|c|");
    }

    #[test]
    fn test_summary_key_escapes_backslash() {
        let first = summary_key("a\\", Some("|c"), None);
        let second = summary_key("a", Some("\\|c"), None);

        assert_ne!(first.to_string(), second.to_string());
    }

    #[tokio::test]
    async fn test_unreachable_redis_reports_error() {
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, _handle) = Cache::new(client);

        let result: AppResult<Option<String>> =
            cache.get_from_cache(&summary_key("Heat", None, None)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_set_after_shutdown_does_not_panic() {
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, handle) = Cache::new(client);

        handle.shutdown().await;
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        cache.set_in_background(&summary_key("Heat", None, None), &"text", 60);
    }

    #[tokio::test]
    async fn test_set_in_background_round_trip() {
        let redis_url = match std::env::var("REDIS_URL") {
            Ok(url) => url,
            Err(_) => return,
        };

        let client = create_redis_client(&redis_url).unwrap();
        let (cache, _handle) = Cache::new(client.clone());
        let key = summary_key("cache_round_trip_test", None, None);

        cache.set_in_background(&key, &"A summary".to_string(), 60);
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let cached: Option<String> = cache.get_from_cache(&key).await.unwrap();
        assert_eq!(cached.as_deref(), Some("A summary"));

        let mut conn = client.get_multiplexed_async_connection().await.unwrap();
        let _: () = conn.del(key.to_string()).await.unwrap();
    }
}
