//! Image map loading with rebuild on staleness.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::application::dto::ListSources;
use crate::application::services::CacheStore;
use crate::domain::entities::{Category, ImageMap};
use crate::domain::errors::RebuildError;
use crate::domain::ports::{ListSourcePort, NotificationPort};
use crate::domain::services::{UrlCodec, populate};

/// Notice shown when the cover lists cannot be refreshed.
pub const REBUILD_FAILED_NOTICE: &str = "Failed to update image list";

/// Returns a fresh image map, rebuilding it from the cover lists when the
/// cached one is missing or stale.
pub struct LoadImageMapUseCase {
    cache_store: Arc<CacheStore>,
    list_source: Arc<dyn ListSourcePort>,
    notifier: Arc<dyn NotificationPort>,
    sources: ListSources,
    codec: UrlCodec,
    notice_duration: Duration,
}

impl LoadImageMapUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        cache_store: Arc<CacheStore>,
        list_source: Arc<dyn ListSourcePort>,
        notifier: Arc<dyn NotificationPort>,
        sources: ListSources,
        codec: UrlCodec,
    ) -> Self {
        Self {
            cache_store,
            list_source,
            notifier,
            sources,
            codec,
            notice_duration: Duration::from_secs(5),
        }
    }

    /// Sets how long failure notices stay visible.
    #[must_use]
    pub const fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    /// Returns the cached map if fresh, otherwise rebuilds it.
    ///
    /// Never fails: when the rebuild fails the previous cached data (even if
    /// stale) is returned, or an empty map if there was none.
    pub async fn execute(&self) -> ImageMap {
        let cached = match self.cache_store.read().await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Failed to read image map cache");
                None
            }
        };

        if let Some(record) = &cached
            && !self.cache_store.is_expired(Some(record.timestamp))
        {
            debug!(
                entries = record.data.len(),
                written_at = %record.timestamp,
                "Using cached image map"
            );
            return record.data.clone();
        }

        debug!(stale = cached.is_some(), "Image map cache needs rebuild");

        match self.rebuild().await {
            Ok(map) => map,
            Err(e) => {
                error!(
                    error = %e,
                    transient = e.is_transient(),
                    "Failed to download image lists"
                );
                self.notifier.notify(REBUILD_FAILED_NOTICE, self.notice_duration);
                cached.map(|record| record.data).unwrap_or_default()
            }
        }
    }

    /// Fetches both lists, parses them and persists the result.
    ///
    /// Nothing is written unless both downloads succeed. A failed write is
    /// logged and the fresh map is still returned.
    ///
    /// # Errors
    /// Returns error if either list download fails.
    pub async fn rebuild(&self) -> Result<ImageMap, RebuildError> {
        debug!(
            anime = %self.sources.anime,
            manga = %self.sources.manga,
            "Downloading cover lists"
        );

        let (anime, manga) = tokio::join!(
            self.list_source.fetch_list(self.sources.url(Category::Anime)),
            self.list_source.fetch_list(self.sources.url(Category::Manga)),
        );

        let (anime, manga) = match (anime, manga) {
            (Ok(anime), Ok(manga)) => (anime, manga),
            (anime, manga) => {
                let failures = [(Category::Anime, anime), (Category::Manga, manga)]
                    .into_iter()
                    .filter_map(|(category, result)| result.err().map(|e| (category, e)))
                    .collect();
                return Err(RebuildError::ListFetch { failures });
            }
        };

        let mut map = ImageMap::new();
        populate(&mut map, &anime, &self.codec);
        populate(&mut map, &manga, &self.codec);

        if let Err(e) = self.cache_store.write(&map).await {
            error!(error = %e, "Failed to persist image map cache");
        }

        info!(
            "Loaded {} anime + {} manga covers",
            map.count(Category::Anime),
            map.count(Category::Manga)
        );
        Ok(map)
    }
}
