//! CLI error type.

use std::path::PathBuf;

use maplayer::config::ConfigError;
use maplayer::logging::LoggingError;
use maplayer::{CoordError, StyleError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration key or value given on the command line.
    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    #[error(transparent)]
    Style(#[from] StyleError),

    /// The style subscription ended in `Failed`.
    #[error("Map style loading error: {0}")]
    StyleLoad(String),

    #[error(transparent)]
    Coordinate(#[from] CoordError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to start async runtime: {0}")]
    Runtime(String),
}
