/// Read-through caching on top of [`Cache`](crate::db::Cache).
///
/// Looks `$key` up first. A hit is returned as-is. A miss, or a failed cache read,
/// runs `$block`, queues the computed value for a background write with `$ttl`
/// seconds to live and returns it. Errors from `$block` are propagated with `?`
/// and nothing is cached for them.
///
/// # Example
/// ```rust,ignore
/// let summary: String = cached!(cache, CacheKey::Summary(request.clone()), 3600, async {
///     generator.summarize(&request).await
/// })?;
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        let key = $key;
        match $cache.get_from_cache(&key).await {
            Ok(Some(hit)) => {
                tracing::debug!(key = %key, "Cache hit");
                Ok(hit)
            }
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(key = %key, error = %e, "Cache read failed, treating as miss");
                }
                let value = $block.await?;
                $cache.set_in_background(&key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
