//! Remote map style loading
//!
//! Fetches a map style document over HTTP, strips the fields the rendering
//! runtime cannot resolve, and exposes the result as a [`LoadState`].
//!
//! # Architecture
//!
//! ```text
//! AsyncHttpClient ──► fetch_style() ──► StyleFetcher ─────┐
//!  (reqwest / mock)    status, parse,                     ├─► StyleLoader ──► StyleSubscription
//!                      sanitize         CachedStyleSource ┘    (spawns)        (watch + cancel)
//!                                        └─ SharedStyleCache (moka, keyed by URL)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use maplayer::style::{ReqwestClient, StyleFetcher, StyleLoader};
//!
//! let loader = StyleLoader::new(StyleFetcher::with_default_url(ReqwestClient::new()?));
//!
//! let mut subscription = loader.subscribe();
//! match subscription.wait().await {
//!     LoadState::Ready(style) => render(style),
//!     LoadState::Failed(message) => show_error(&message),
//!     LoadState::Loading => unreachable!(),
//! }
//! ```

mod cache;
mod document;
mod error;
mod fetcher;
mod http;
mod loader;

pub use cache::{CachedStyleSource, SharedStyleCache, DEFAULT_CACHE_TTL, MAX_CACHE_TTL};
pub use document::StyleDocument;
pub use error::StyleError;
pub use fetcher::{fetch_raw_style, fetch_style, StyleFetcher, StyleSource};
pub use http::{AsyncHttpClient, HttpResponse, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use loader::{LoadState, StyleLoader, StyleSubscription};

/// Style endpoint used when none is configured.
pub const DEFAULT_STYLE_URL: &str = "https://na-maps.vng-solutions.com/styles/spl_bgmaps/style.json";
