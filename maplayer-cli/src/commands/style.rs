//! Map style fetch command.
//!
//! Loads the style through the same subscription path an app screen uses,
//! then writes the sanitized document to stdout or a file.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use maplayer::style::{
    fetch_raw_style, CachedStyleSource, ReqwestClient, SharedStyleCache, StyleDocument,
    StyleFetcher, StyleLoader, StyleSource,
};
use maplayer::LoadState;
use tracing::info;

use super::common::load_config;
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct StyleArgs {
    /// Style endpoint (defaults to config / MAPLAYER_STYLE_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Write the document to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep the `sprite` field as served
    #[arg(long)]
    pub keep_sprite: bool,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}

/// Run the style command.
pub fn run(args: StyleArgs) -> Result<(), CliError> {
    let config = load_config();
    let url = args
        .url
        .clone()
        .unwrap_or_else(|| config.style.effective_url());
    let client = ReqwestClient::with_timeout(config.style.timeout())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    let document = runtime.block_on(async {
        if args.keep_sprite {
            return fetch_raw_style(&client, &url).await.map_err(CliError::from);
        }

        match config.style.cache_ttl() {
            Some(ttl) => {
                let cache = Arc::new(SharedStyleCache::new(client, ttl));
                load(StyleLoader::new(CachedStyleSource::new(cache, url.as_str()))).await
            }
            None => load(StyleLoader::new(StyleFetcher::new(client, url.as_str()))).await,
        }
    })?;

    write_document(&document, &args)
}

/// Subscribes once and waits for the terminal state.
async fn load<S: StyleSource>(loader: StyleLoader<S>) -> Result<StyleDocument, CliError> {
    let mut subscription = loader.subscribe();
    match subscription.wait().await {
        LoadState::Ready(document) => Ok(document),
        LoadState::Failed(message) => Err(CliError::StyleLoad(message)),
        LoadState::Loading => Err(CliError::StyleLoad(
            "loading ended without a result".to_string(),
        )),
    }
}

fn write_document(document: &StyleDocument, args: &StyleArgs) -> Result<(), CliError> {
    let json = document.to_json_string(!args.compact);

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n").map_err(|source| CliError::Output {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "Wrote map style");

            println!("Style:   {}", document.name().unwrap_or("(unnamed)"));
            println!("Layers:  {}", document.layer_count());
            println!("Sources: {}", document.source_names().join(", "));
            println!("Written: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_document_to_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("style.json");
        let document =
            StyleDocument::from_slice(br#"{"version":8,"name":"Test","layers":[]}"#).unwrap();

        let args = StyleArgs {
            url: None,
            output: Some(path.clone()),
            keep_sprite: false,
            compact: true,
        };
        write_document(&document, &args).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(StyleDocument::from_slice(&written).unwrap(), document);
    }
}
