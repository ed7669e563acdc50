//! Shared style cache keyed by endpoint URL.
//!
//! Without a cache every subscription performs its own request. With one,
//! concurrent loads of the same URL are coalesced into a single request and
//! later loads are served from memory until the entry's time-to-live runs
//! out.
//!
//! Failures are never cached: the next load after a failure tries again.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use super::document::StyleDocument;
use super::error::StyleError;
use super::fetcher::{fetch_style, StyleSource};
use super::http::AsyncHttpClient;

/// Default lifetime of a cached style.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Longest lifetime a cached style may have.
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Upper bound on distinct style URLs kept in memory.
const MAX_CACHED_STYLES: u64 = 16;

/// Style documents shared between subscribers, keyed by URL.
pub struct SharedStyleCache<C: AsyncHttpClient> {
    http_client: C,
    documents: MokaCache<String, StyleDocument>,
}

impl<C: AsyncHttpClient> SharedStyleCache<C> {
    /// Creates a cache whose entries expire after `ttl`, capped at
    /// [`MAX_CACHE_TTL`].
    pub fn new(http_client: C, ttl: Duration) -> Self {
        let documents = MokaCache::builder()
            .max_capacity(MAX_CACHED_STYLES)
            .time_to_live(ttl.min(MAX_CACHE_TTL))
            .build();

        Self {
            http_client,
            documents,
        }
    }

    /// Returns the style for `url`, fetching it if not cached.
    ///
    /// Concurrent callers for the same URL share one request.
    pub async fn get(&self, url: &str) -> Result<StyleDocument, StyleError> {
        if let Some(document) = self.documents.get(url).await {
            debug!(url = %url, "Map style served from cache");
            return Ok(document);
        }

        self.documents
            .try_get_with(url.to_string(), fetch_style(&self.http_client, url))
            .await
            .map_err(|e: Arc<StyleError>| (*e).clone())
    }

    /// Drops the cached entry for `url`, if any.
    pub async fn invalidate(&self, url: &str) {
        self.documents.invalidate(url).await;
    }

    pub fn contains(&self, url: &str) -> bool {
        self.documents.contains_key(url)
    }
}

/// A [`StyleSource`] reading one URL through a shared cache.
pub struct CachedStyleSource<C: AsyncHttpClient> {
    cache: Arc<SharedStyleCache<C>>,
    url: String,
}

impl<C: AsyncHttpClient> CachedStyleSource<C> {
    pub fn new(cache: Arc<SharedStyleCache<C>>, url: impl Into<String>) -> Self {
        Self {
            cache,
            url: url.into(),
        }
    }
}

impl<C: AsyncHttpClient + 'static> StyleSource for CachedStyleSource<C> {
    async fn load(&self) -> Result<StyleDocument, StyleError> {
        self.cache.get(&self.url).await
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use tokio::sync::Notify;

    use super::*;
    use crate::style::http::tests::MockHttpClient;
    use crate::style::loader::StyleLoader;

    const URL: &str = "https://example.com/style.json";
    const STYLE_JSON: &str = r#"{"version":8,"sprite":"x","layers":[{"id":"bg"}]}"#;

    #[tokio::test]
    async fn test_second_get_served_from_cache() {
        let client = MockHttpClient::json(STYLE_JSON);
        let calls = Arc::clone(&client.calls);
        let cache = SharedStyleCache::new(client, DEFAULT_CACHE_TTL);

        let first = cache.get(URL).await.unwrap();
        let second = cache.get(URL).await.unwrap();

        assert_eq!(first, second);
        assert!(!first.has_sprite());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains(URL));
    }

    #[tokio::test]
    async fn test_concurrent_gets_coalesce() {
        let gate = Arc::new(Notify::new());
        let client = MockHttpClient::json(STYLE_JSON).gated(Arc::clone(&gate));
        let calls = Arc::clone(&client.calls);
        let cache = Arc::new(SharedStyleCache::new(client, DEFAULT_CACHE_TTL));

        let loader = StyleLoader::new(CachedStyleSource::new(Arc::clone(&cache), URL));
        let mut a = loader.subscribe();
        let mut b = loader.subscribe();

        tokio::time::sleep(Duration::from_millis(20)).await;
        gate.notify_waiters();
        gate.notify_one();

        assert!(a.wait().await.is_ready());
        assert!(b.wait().await.is_ready());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_not_cached() {
        let client = MockHttpClient::status(502);
        let calls = Arc::clone(&client.calls);
        let cache = SharedStyleCache::new(client, DEFAULT_CACHE_TTL);

        let err = cache.get(URL).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(cache.get(URL).await.is_err());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(!cache.contains(URL));
    }

    #[tokio::test]
    async fn test_oversized_ttl_is_capped() {
        let client = MockHttpClient::json(STYLE_JSON);
        let cache = SharedStyleCache::new(client, Duration::from_secs(u64::MAX));

        assert!(cache.get(URL).await.is_ok());
        assert!(cache.contains(URL));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let client = MockHttpClient::json(STYLE_JSON);
        let calls = Arc::clone(&client.calls);
        let cache = SharedStyleCache::new(client, DEFAULT_CACHE_TTL);

        cache.get(URL).await.unwrap();
        cache.invalidate(URL).await;
        cache.get(URL).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
