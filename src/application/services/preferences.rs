//! User preferences persisted next to the cache.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::errors::StorageError;
use crate::domain::ports::StoragePort;

/// Storage key of the enabled flag.
pub const ENABLED_KEY: &str = "malImagesEnabled";

/// Reads and writes the on/off switch.
pub struct Preferences {
    storage: Arc<dyn StoragePort>,
}

impl Preferences {
    /// Creates preferences backed by `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    /// Returns whether cover replacement is enabled.
    ///
    /// Only an explicit `false` disables it; missing or unreadable values
    /// count as enabled.
    pub async fn is_enabled(&self) -> bool {
        match self.storage.get(ENABLED_KEY).await {
            Ok(Some(raw)) => raw.trim() != "false",
            Ok(None) => true,
            Err(e) => {
                warn!(error = %e, "Failed to read enabled flag, assuming enabled");
                true
            }
        }
    }

    /// Stores the enabled flag.
    ///
    /// # Errors
    /// Returns error if the storage backend fails.
    pub async fn set_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.storage
            .set(ENABLED_KEY, if enabled { "true" } else { "false" })
            .await?;
        debug!(enabled, "Stored enabled flag");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockStorage;

    #[tokio::test]
    async fn test_enabled_by_default() {
        let prefs = Preferences::new(Arc::new(MockStorage::new()));
        assert!(prefs.is_enabled().await);
    }

    #[tokio::test]
    async fn test_toggle() {
        let prefs = Preferences::new(Arc::new(MockStorage::new()));

        prefs.set_enabled(false).await.unwrap();
        assert!(!prefs.is_enabled().await);

        prefs.set_enabled(true).await.unwrap();
        assert!(prefs.is_enabled().await);
    }

    #[tokio::test]
    async fn test_read_failure_counts_as_enabled() {
        let storage = Arc::new(MockStorage::new());
        storage.set_fail_reads(true);
        let prefs = Preferences::new(storage);

        assert!(prefs.is_enabled().await);
    }
}
