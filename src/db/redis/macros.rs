/// Read-through caching for catalog fetches.
///
/// `$cache` is an `Option<Cache>`. With no cache configured the block simply runs.
/// A cache read failure is logged and treated as a miss so that a Redis outage never
/// takes the catalog down with it. Fresh values are written back in the background.
///
/// # Example
/// ```rust,ignore
/// cached!(self.cache, CacheKey::MovieDetails(id), DETAILS_CACHE_TTL, async move {
///     fetch_movie(id).await
/// })
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache.as_ref() {
            Some(cache) => {
                let key = $key;
                let hit = match cache.get_from_cache(&key).await {
                    Ok(hit) => hit,
                    Err(e) => {
                        tracing::warn!(error = %e, key = %key, "Cache read failed, fetching from catalog");
                        None
                    }
                };

                match hit {
                    Some(hit) => Ok(hit),
                    None => {
                        let value = $block.await?;
                        cache.set_in_background(&key, &value, $ttl);
                        Ok(value)
                    }
                }
            }
            None => $block.await,
        }
    }};
}
