//! Tracing subscriber setup.
//!
//! Log lines go to stderr, and optionally to a file through a non-blocking
//! writer. Filtering follows `RUST_LOG` when set; `verbose` forces debug
//! output for the MapLayer crates.

use std::path::{Path, PathBuf};

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "maplayer=info,maplayer_cli=info";
const VERBOSE_DIRECTIVES: &str = "maplayer=debug,maplayer_cli=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log file path {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Failed to open log file {}: {reason}", path.display())]
    Appender { path: PathBuf, reason: String },

    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Force debug output regardless of `RUST_LOG`.
    pub verbose: bool,
    /// Additional log file; appended to, never rotated.
    pub log_file: Option<PathBuf>,
}

/// Filter directives for the given verbosity and `RUST_LOG` value.
fn filter_directives(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return VERBOSE_DIRECTIVES.to_string();
    }
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(path.to_path_buf()))?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| LoggingError::Appender {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Installs the global subscriber.
///
/// Returns the file writer's guard when a log file is configured; it must be
/// held until shutdown or buffered lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let directives = filter_directives(config.verbose, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let timer = OffsetTime::local_rfc_3339()
        .unwrap_or_else(|_| OffsetTime::new(UtcOffset::UTC, Rfc3339));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(timer.clone());

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(timer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_rust_log() {
        assert_eq!(
            filter_directives(true, Some("warn".to_string())),
            VERBOSE_DIRECTIVES
        );
    }

    #[test]
    fn test_rust_log_used_when_set() {
        assert_eq!(
            filter_directives(false, Some("maplayer=trace".to_string())),
            "maplayer=trace"
        );
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(filter_directives(false, None), DEFAULT_DIRECTIVES);
        assert_eq!(filter_directives(false, Some(" ".to_string())), DEFAULT_DIRECTIVES);
    }

    #[test]
    fn test_file_appender_creates_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("maplayer.log");

        file_appender(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_appender_rejects_directory_path() {
        let result = file_appender(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }
}
