//! Persistence errors.

use thiserror::Error;

/// Failure of the key-value persistence layer.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("storage io error ({context}): {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Creates an IO error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates an encode error for a key.
    #[must_use]
    pub fn encode(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Encode {
            key: key.into(),
            source,
        }
    }
}
