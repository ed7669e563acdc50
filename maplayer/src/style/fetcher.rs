//! One-shot style fetching.

use std::future::Future;

use tracing::{debug, info, warn};

use super::document::StyleDocument;
use super::error::StyleError;
use super::http::AsyncHttpClient;
use super::DEFAULT_STYLE_URL;

/// Something that can produce a sanitized style document on demand.
///
/// Implemented by [`StyleFetcher`] (one request per call) and by
/// [`CachedStyleSource`](super::CachedStyleSource) (shared, coalesced).
pub trait StyleSource: Send + Sync + 'static {
    /// Loads the style once.
    fn load(&self) -> impl Future<Output = Result<StyleDocument, StyleError>> + Send;

    /// Endpoint this source reads from, for logging.
    fn url(&self) -> &str;
}

/// Performs a single GET against `url`, checks the status and parses the
/// body. The document is returned as served, `sprite` included.
pub async fn fetch_raw_style<C: AsyncHttpClient>(
    client: &C,
    url: &str,
) -> Result<StyleDocument, StyleError> {
    debug!(url = %url, "Fetching map style");

    let response = client.get(url).await?;
    if !response.is_success() {
        return Err(StyleError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    StyleDocument::from_slice(&response.body)
}

/// Fetches the style at `url` and strips unsupported fields.
///
/// No retry and no backoff: every call is exactly one request.
pub async fn fetch_style<C: AsyncHttpClient>(
    client: &C,
    url: &str,
) -> Result<StyleDocument, StyleError> {
    let result = fetch_raw_style(client, url).await.map(|document| {
        let sprite_stripped = document.has_sprite();
        let document = document.sanitize();

        info!(
            url = %url,
            name = document.name().unwrap_or("unnamed"),
            layers = document.layer_count(),
            sprite_stripped,
            "Loaded map style"
        );
        document
    });

    if let Err(e) = &result {
        warn!(url = %url, error = %e, "Error fetching map style");
    }
    result
}

/// Fetches the style from a fixed endpoint with an injected HTTP client.
///
/// # Example
///
/// ```no_run
/// use maplayer::style::{ReqwestClient, StyleFetcher};
///
/// # async fn run() -> Result<(), maplayer::style::StyleError> {
/// let fetcher = StyleFetcher::with_default_url(ReqwestClient::new()?);
/// let style = fetcher.fetch_map_style().await?;
/// assert!(!style.has_sprite());
/// # Ok(())
/// # }
/// ```
pub struct StyleFetcher<C: AsyncHttpClient> {
    http_client: C,
    url: String,
}

impl<C: AsyncHttpClient> StyleFetcher<C> {
    pub fn new(http_client: C, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }

    /// Creates a fetcher for [`DEFAULT_STYLE_URL`].
    pub fn with_default_url(http_client: C) -> Self {
        Self::new(http_client, DEFAULT_STYLE_URL)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn http_client(&self) -> &C {
        &self.http_client
    }

    /// Fetches and sanitizes the style document.
    pub async fn fetch_map_style(&self) -> Result<StyleDocument, StyleError> {
        fetch_style(&self.http_client, &self.url).await
    }
}

impl<C: AsyncHttpClient + 'static> StyleSource for StyleFetcher<C> {
    fn load(&self) -> impl Future<Output = Result<StyleDocument, StyleError>> + Send {
        self.fetch_map_style()
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::http::tests::MockHttpClient;
    use crate::style::http::HttpResponse;

    const STYLE_JSON: &str = r#"{"version":8,"name":"test","sprite":"https://example.com/sprite","layers":[]}"#;

    #[tokio::test]
    async fn test_fetch_strips_sprite() {
        let fetcher = StyleFetcher::new(MockHttpClient::json(STYLE_JSON), "https://example.com");

        let doc = fetcher.fetch_map_style().await.unwrap();
        assert!(!doc.has_sprite());
        assert_eq!(doc.name(), Some("test"));
    }

    #[tokio::test]
    async fn test_fetch_single_attempt() {
        let fetcher = StyleFetcher::new(MockHttpClient::status(503), "https://example.com");

        assert!(fetcher.fetch_map_style().await.is_err());
        assert_eq!(fetcher.http_client().call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let fetcher = StyleFetcher::new(MockHttpClient::status(404), "https://example.com/style.json");

        match fetcher.fetch_map_style().await {
            Err(StyleError::HttpStatus { status, url }) => {
                assert_eq!(status, 404);
                assert_eq!(url, "https://example.com/style.json");
            }
            other => panic!("Expected HttpStatus error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_status_checked_before_body() {
        // A 500 with a valid JSON body is still a failure
        let client = MockHttpClient::new(Ok(HttpResponse {
            status: 500,
            body: STYLE_JSON.as_bytes().to_vec(),
        }));
        let fetcher = StyleFetcher::new(client, "https://example.com");

        let err = fetcher.fetch_map_style().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_fetch_invalid_body() {
        let fetcher = StyleFetcher::new(MockHttpClient::json("not json"), "https://example.com");

        let result = fetcher.fetch_map_style().await;
        assert!(matches!(result, Err(StyleError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_transport_error_passes_through() {
        let client = MockHttpClient::new(Err(StyleError::Transport {
            url: "https://example.com".to_string(),
            reason: "dns error".to_string(),
        }));
        let fetcher = StyleFetcher::new(client, "https://example.com");

        let result = fetcher.fetch_map_style().await;
        assert!(matches!(result, Err(StyleError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_fetch_raw_keeps_sprite() {
        let client = MockHttpClient::json(STYLE_JSON);

        let doc = fetch_raw_style(&client, "https://example.com").await.unwrap();
        assert!(doc.has_sprite());
        assert_eq!(doc.sanitize(), fetch_style(&client, "https://example.com").await.unwrap());
    }

    #[test]
    fn test_default_url() {
        let fetcher = StyleFetcher::with_default_url(MockHttpClient::json("{}"));
        assert_eq!(fetcher.url(), DEFAULT_STYLE_URL);
        assert_eq!(StyleSource::url(&fetcher), DEFAULT_STYLE_URL);
    }
}
