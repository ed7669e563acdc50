//! Style loading errors.

use thiserror::Error;

/// Errors that can occur while fetching a map style.
///
/// At the subscription boundary every variant collapses into its display
/// message; the variants exist for logging and for direct callers of
/// [`fetch_style`](super::fetch_style).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request could not be completed (DNS, connect, timeout, body read).
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    HttpStatus { url: String, status: u16 },

    /// The body was not a JSON object.
    #[error("Invalid style document: {0}")]
    Parse(String),
}

impl StyleError {
    /// Status code for `HttpStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            StyleError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
