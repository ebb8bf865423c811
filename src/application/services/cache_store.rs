//! Persisted image map with a fixed staleness window.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::domain::entities::{CacheRecord, ImageMap};
use crate::domain::errors::StorageError;
use crate::domain::ports::StoragePort;

/// Storage key of the cached record.
pub const CACHE_KEY: &str = "imageMapCache";

/// Storage key of the cache format marker.
pub const CACHE_VERSION_KEY: &str = "imageMapCacheVersion";

/// Current cache format.
pub const CACHE_VERSION: u32 = 1;

/// Default maximum record age: two weeks.
pub const DEFAULT_MAX_AGE: Duration = Duration::days(14);

/// Owns the persisted [`CacheRecord`] and decides whether it is fresh.
pub struct CacheStore {
    storage: Arc<dyn StoragePort>,
    max_age: Duration,
    last_written_ms: AtomicI64,
}

impl CacheStore {
    /// Creates a store with the given maximum age.
    #[must_use]
    pub fn new(storage: Arc<dyn StoragePort>, max_age: Duration) -> Self {
        Self {
            storage,
            max_age,
            last_written_ms: AtomicI64::new(i64::MIN),
        }
    }

    /// Creates a store with the default two week window.
    #[must_use]
    pub fn with_default_max_age(storage: Arc<dyn StoragePort>) -> Self {
        Self::new(storage, DEFAULT_MAX_AGE)
    }

    /// Returns the staleness window.
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Reads the persisted record.
    ///
    /// A value that cannot be decoded is treated as absent.
    ///
    /// # Errors
    /// Returns error if the storage backend fails.
    pub async fn read(&self) -> Result<Option<CacheRecord>, StorageError> {
        let Some(raw) = self.storage.get(CACHE_KEY).await? else {
            debug!("No cached image map");
            return Ok(None);
        };

        let record = match serde_json::from_str::<CacheRecord>(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable image map cache");
                return Ok(None);
            }
        };

        match self.stored_version().await {
            Ok(Some(CACHE_VERSION)) => {}
            Ok(version) => {
                debug!(?version, expected = CACHE_VERSION, "Cache version marker differs");
            }
            Err(e) => debug!(error = %e, "Failed to read cache version marker"),
        }

        Ok(Some(record))
    }

    /// Returns true if `timestamp` is absent or older than the maximum age.
    #[must_use]
    pub fn is_expired(&self, timestamp: Option<DateTime<Utc>>) -> bool {
        self.is_expired_at(timestamp, Utc::now())
    }

    /// Same as [`Self::is_expired`] against an explicit current time.
    #[must_use]
    pub fn is_expired_at(&self, timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        timestamp.is_none_or(|ts| now - ts > self.max_age)
    }

    /// Persists `data` with the current time, replacing any previous record.
    ///
    /// Timestamps never go backwards across writes from this store.
    ///
    /// # Errors
    /// Returns error if the record cannot be encoded or stored.
    pub async fn write(&self, data: &ImageMap) -> Result<CacheRecord, StorageError> {
        let now_ms = Utc::now().timestamp_millis();
        let previous = self.last_written_ms.fetch_max(now_ms, Ordering::SeqCst);
        let timestamp =
            DateTime::from_timestamp_millis(now_ms.max(previous)).unwrap_or_else(Utc::now);

        let record = CacheRecord::new(data.clone(), timestamp);
        let raw = serde_json::to_string(&record).map_err(|e| StorageError::encode(CACHE_KEY, e))?;
        self.storage.set(CACHE_KEY, &raw).await?;

        if let Err(e) = self
            .storage
            .set(CACHE_VERSION_KEY, &CACHE_VERSION.to_string())
            .await
        {
            warn!(error = %e, "Failed to store cache version marker");
        }

        debug!(
            entries = data.len(),
            bytes = raw.len(),
            timestamp = %record.timestamp,
            "Stored image map cache"
        );
        Ok(record)
    }

    /// Removes the persisted record so the next read reports no cache.
    ///
    /// # Errors
    /// Returns error if the storage backend fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(CACHE_KEY).await?;
        debug!("Cleared image map cache");
        Ok(())
    }

    /// Reads the cache format marker, if one was stored.
    ///
    /// # Errors
    /// Returns error if the storage backend fails.
    pub async fn stored_version(&self) -> Result<Option<u32>, StorageError> {
        Ok(self
            .storage
            .get(CACHE_VERSION_KEY)
            .await?
            .and_then(|raw| raw.trim().parse().ok()))
    }
}
