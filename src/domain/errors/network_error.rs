//! Cover list download errors.

use thiserror::Error;

/// Failure to download a cover list.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum NetworkError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

impl NetworkError {
    /// Creates transport error.
    #[must_use]
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates timeout error.
    #[must_use]
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates non-success status error.
    #[must_use]
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates body read error.
    #[must_use]
    pub fn body(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Body {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns the URL that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. }
            | Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Body { url, .. } => url,
        }
    }

    /// Returns whether a later attempt may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } | Self::Body { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
        }
    }
}
