//! Subscription wrapper exposing style loading as a tri-state value.
//!
//! # Lifecycle
//!
//! ```text
//! subscribe() ──► Loading ──┬──► Ready(document)
//!                           └──► Failed(message)
//!
//! unsubscribe() / drop ──► cancel token fired, late result discarded
//! ```
//!
//! Each subscription spawns its own fetch task; there is no sharing between
//! subscriptions unless the loader was built on a
//! [`CachedStyleSource`](super::CachedStyleSource).

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::document::StyleDocument;
use super::fetcher::StyleSource;

/// Load state of an asynchronous resource.
///
/// Transitions are `Loading → Ready` or `Loading → Failed`, each at most
/// once per load cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// The loaded value, if ready.
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// The failure message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Starts style loads and hands out subscriptions.
///
/// Must be used from within a Tokio runtime: [`subscribe`](Self::subscribe)
/// spawns the fetch task.
pub struct StyleLoader<S: StyleSource> {
    source: Arc<S>,
}

impl<S: StyleSource> Clone for StyleLoader<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: StyleSource> StyleLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Starts a load cycle.
    ///
    /// The returned subscription starts in `Loading` and moves to its
    /// terminal state when the fetch completes, unless it has been released
    /// first.
    pub fn subscribe(&self) -> StyleSubscription {
        let (tx, rx) = watch::channel(LoadState::Loading);
        let cancellation = CancellationToken::new();

        let source = Arc::clone(&self.source);
        let token = cancellation.clone();

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(url = %source.url(), "Style subscription released before load completed");
                    return;
                }
                result = source.load() => result,
            };

            let next = match result {
                Ok(document) => LoadState::Ready(document),
                Err(e) => {
                    warn!(url = %source.url(), error = %e, "Map style loading error");
                    LoadState::Failed(e.to_string())
                }
            };

            // Only the first terminal state lands, and never after release
            let applied = tx.send_if_modified(|state| {
                if token.is_cancelled() || !state.is_loading() {
                    return false;
                }
                *state = next;
                true
            });

            if !applied {
                debug!(url = %source.url(), "Discarded style result after release");
            }
        });

        StyleSubscription {
            state: rx,
            cancellation,
            released: None,
        }
    }
}

/// A consumer's handle on one style load cycle.
///
/// Dropping the subscription releases it.
#[derive(Debug)]
pub struct StyleSubscription {
    state: watch::Receiver<LoadState<StyleDocument>>,
    cancellation: CancellationToken,
    released: Option<LoadState<StyleDocument>>,
}

impl StyleSubscription {
    /// Current state. After release this is frozen at the state observed
    /// when [`unsubscribe`](Self::unsubscribe) was called.
    pub fn state(&self) -> LoadState<StyleDocument> {
        match &self.released {
            Some(snapshot) => snapshot.clone(),
            None => self.state.borrow().clone(),
        }
    }

    /// Waits for the terminal state.
    ///
    /// Returns immediately with the frozen state if already released.
    pub async fn wait(&mut self) -> LoadState<StyleDocument> {
        if let Some(snapshot) = &self.released {
            return snapshot.clone();
        }

        let terminal = self
            .state
            .wait_for(|state| !state.is_loading())
            .await
            .map(|state| state.clone());

        match terminal {
            Ok(state) => state,
            // Task ended without a terminal state
            Err(_) => self.state.borrow().clone(),
        }
    }

    /// A receiver for observing state changes.
    ///
    /// The receiver sees at most one change: the terminal state.
    pub fn watch(&self) -> watch::Receiver<LoadState<StyleDocument>> {
        self.state.clone()
    }

    /// Releases the subscription.
    ///
    /// The in-flight fetch is cancelled and any result arriving afterwards is
    /// dropped. Returns the state at release time. Calling it again is a
    /// no-op returning the same state.
    pub fn unsubscribe(&mut self) -> LoadState<StyleDocument> {
        if let Some(snapshot) = &self.released {
            return snapshot.clone();
        }

        self.cancellation.cancel();
        let snapshot = self.state.borrow().clone();
        self.released = Some(snapshot.clone());
        snapshot
    }

    pub fn is_released(&self) -> bool {
        self.released.is_some()
    }

    #[cfg(test)]
    pub(crate) fn cancellation(&self) -> CancellationToken {
        self.cancellation.clone()
    }
}

impl Drop for StyleSubscription {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::Map;
    use tokio::sync::Notify;

    use super::*;
    use crate::style::error::StyleError;
    use crate::style::fetcher::StyleFetcher;
    use crate::style::http::tests::MockHttpClient;

    const STYLE_JSON: &str = r#"{"version":8,"sprite":"mapbox://sprites/x","layers":[]}"#;

    fn loader(client: MockHttpClient) -> StyleLoader<StyleFetcher<MockHttpClient>> {
        StyleLoader::new(StyleFetcher::new(client, "https://example.com/style.json"))
    }

    /// Source that releases its subscriber while producing a document, so
    /// the load completes but the result arrives after release.
    #[derive(Default)]
    struct ReleasingSource {
        release: Mutex<Option<CancellationToken>>,
        loaded: AtomicBool,
    }

    impl StyleSource for ReleasingSource {
        async fn load(&self) -> Result<StyleDocument, StyleError> {
            if let Some(token) = self.release.lock().unwrap().take() {
                token.cancel();
            }
            self.loaded.store(true, Ordering::SeqCst);
            Ok(StyleDocument::new(Map::new()))
        }

        fn url(&self) -> &str {
            "https://example.com/style.json"
        }
    }

    #[test]
    fn test_load_state_accessors() {
        let ready: LoadState<u32> = LoadState::Ready(7);
        assert!(ready.is_ready());
        assert_eq!(ready.data(), Some(&7));
        assert_eq!(ready.error(), None);

        let failed: LoadState<u32> = LoadState::Failed("boom".to_string());
        assert!(failed.is_failed());
        assert_eq!(failed.error(), Some("boom"));
        assert_eq!(failed.into_data(), None);

        assert!(LoadState::<u32>::default().is_loading());
    }

    #[tokio::test]
    async fn test_subscription_starts_loading() {
        let gate = Arc::new(Notify::new());
        let loader = loader(MockHttpClient::json(STYLE_JSON).gated(Arc::clone(&gate)));

        let subscription = loader.subscribe();
        assert!(subscription.state().is_loading());
    }

    #[tokio::test]
    async fn test_subscription_becomes_ready() {
        let loader = loader(MockHttpClient::json(STYLE_JSON));

        let mut subscription = loader.subscribe();
        let state = subscription.wait().await;

        let doc = state.data().expect("style should be ready");
        assert!(!doc.has_sprite());
        assert!(subscription.state().is_ready());
    }

    #[tokio::test]
    async fn test_subscription_fails_on_status() {
        let loader = loader(MockHttpClient::status(500));

        let mut subscription = loader.subscribe();
        let state = subscription.wait().await;

        assert_eq!(state.error(), Some("HTTP error! status: 500"));
    }

    #[tokio::test]
    async fn test_subscription_fails_on_transport_error() {
        let loader = loader(MockHttpClient::new(Err(StyleError::Transport {
            url: "https://example.com/style.json".to_string(),
            reason: "connection reset".to_string(),
        })));

        let mut subscription = loader.subscribe();
        let state = subscription.wait().await;

        assert!(state.is_failed());
        assert!(state.error().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_exactly_one_transition() {
        let gate = Arc::new(Notify::new());
        let loader = loader(MockHttpClient::json(STYLE_JSON).gated(Arc::clone(&gate)));

        let subscription = loader.subscribe();
        let mut rx = subscription.watch();
        gate.notify_one();

        let mut transitions = 0;
        while rx.changed().await.is_ok() {
            transitions += 1;
            assert!(rx.borrow_and_update().is_ready());
        }

        assert_eq!(transitions, 1);
        assert!(subscription.state().is_ready());
    }

    #[tokio::test]
    async fn test_unsubscribe_discards_late_result() {
        let gate = Arc::new(Notify::new());
        let loader = loader(MockHttpClient::json(STYLE_JSON).gated(Arc::clone(&gate)));

        let mut subscription = loader.subscribe();
        tokio::task::yield_now().await;

        let at_release = subscription.unsubscribe();
        assert!(at_release.is_loading());

        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(subscription.is_released());
        assert!(subscription.state().is_loading());
        assert!(subscription.wait().await.is_loading());
        assert!(subscription.watch().borrow().is_loading());
    }

    #[tokio::test]
    async fn test_result_completed_after_release_is_discarded() {
        let loader = StyleLoader::new(ReleasingSource::default());

        let mut subscription = loader.subscribe();
        *loader.source().release.lock().unwrap() = Some(subscription.cancellation());

        let mut rx = subscription.watch();
        assert!(rx.changed().await.is_err(), "no state should be published");

        assert!(loader.source().loaded.load(Ordering::SeqCst));
        assert!(rx.borrow().is_loading());
        assert!(subscription.state().is_loading());
        assert!(subscription.wait().await.is_loading());
    }

    #[tokio::test]
    async fn test_unsubscribe_after_ready_keeps_ready() {
        let loader = loader(MockHttpClient::json(STYLE_JSON));

        let mut subscription = loader.subscribe();
        subscription.wait().await;

        assert!(subscription.unsubscribe().is_ready());
        assert!(subscription.unsubscribe().is_ready());
        assert!(subscription.state().is_ready());
    }

    #[tokio::test]
    async fn test_each_subscription_fetches() {
        let client = MockHttpClient::json(STYLE_JSON);
        let calls = Arc::clone(&client.calls);
        let loader = loader(client);

        let mut first = loader.subscribe();
        let mut second = loader.clone().subscribe();
        first.wait().await;
        second.wait().await;

        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }
}
