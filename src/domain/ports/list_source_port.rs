//! Cover list source port definition.

use async_trait::async_trait;

use crate::domain::errors::NetworkError;

/// Port for downloading raw cover list payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListSourcePort: Send + Sync {
    /// Downloads the list at `url` and returns its body as text.
    ///
    /// Fails on transport errors and on non-success responses.
    async fn fetch_list(&self, url: &str) -> Result<String, NetworkError>;
}
