//! Manual cache clear and reload.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::LoadImageMapUseCase;
use crate::application::services::{CacheStore, ImageMapHandle};
use crate::domain::entities::ImageMap;
use crate::domain::errors::StorageError;
use crate::domain::ports::NotificationPort;

/// Notice shown after the cache was cleared.
pub const CACHE_CLEARED_NOTICE: &str = "Cache cleared";

/// Drops the persisted map and loads a fresh one into the session.
pub struct ClearCacheUseCase {
    cache_store: Arc<CacheStore>,
    loader: Arc<LoadImageMapUseCase>,
    handle: ImageMapHandle,
    notifier: Arc<dyn NotificationPort>,
    notice_duration: Duration,
}

impl ClearCacheUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(
        cache_store: Arc<CacheStore>,
        loader: Arc<LoadImageMapUseCase>,
        handle: ImageMapHandle,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            cache_store,
            loader,
            handle,
            notifier,
            notice_duration: Duration::from_secs(5),
        }
    }

    /// Sets how long the confirmation notice stays visible.
    #[must_use]
    pub const fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    /// Clears the persisted map, empties the session map, then reloads.
    ///
    /// Lookups made before the reload finishes see an empty map.
    ///
    /// # Errors
    /// Returns error if the persisted record cannot be removed.
    pub async fn execute(&self, show_feedback: bool) -> Result<Arc<ImageMap>, StorageError> {
        self.cache_store.clear().await?;
        self.handle.reset();
        info!("Image map cache cleared");

        if show_feedback {
            self.notifier.notify(CACHE_CLEARED_NOTICE, self.notice_duration);
        }

        let map = self.loader.execute().await;
        self.handle.replace(map);
        Ok(self.handle.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ListSources;
    use crate::application::use_cases::REBUILD_FAILED_NOTICE;
    use crate::domain::entities::{Category, EntityRef};
    use crate::domain::errors::NetworkError;
    use crate::domain::ports::MockListSourcePort;
    use crate::domain::ports::mocks::{MockNotificationPort, MockStorage};
    use crate::domain::services::UrlCodec;

    struct Fixture {
        storage: Arc<MockStorage>,
        store: Arc<CacheStore>,
        handle: ImageMapHandle,
        notifier: Arc<MockNotificationPort>,
    }

    impl Fixture {
        async fn with_cached_map() -> Self {
            let storage = Arc::new(MockStorage::new());
            let store = Arc::new(CacheStore::with_default_max_age(storage.clone()));
            let mut map = ImageMap::new();
            map.insert(EntityRef::new(Category::Anime, 1), "/old.jpg");
            store.write(&map).await.unwrap();

            Self {
                storage,
                store,
                handle: ImageMapHandle::with_map(map),
                notifier: Arc::new(MockNotificationPort::new()),
            }
        }

        fn use_case(&self, source: MockListSourcePort) -> ClearCacheUseCase {
            let loader = LoadImageMapUseCase::new(
                self.store.clone(),
                Arc::new(source),
                self.notifier.clone(),
                ListSources::new("https://lists.test/anime", "https://lists.test/manga"),
                UrlCodec::default(),
            );
            ClearCacheUseCase::new(
                self.store.clone(),
                Arc::new(loader),
                self.handle.clone(),
                self.notifier.clone(),
            )
        }
    }

    #[tokio::test]
    async fn test_clear_then_reload() {
        let fixture = Fixture::with_cached_map().await;
        let mut source = MockListSourcePort::new();
        source.expect_fetch_list().times(2).returning(|url| {
            if url.ends_with("anime") {
                Ok(r#".animetitle[href^="/anime/7/"]{background-image:url(/7.jpg)}"#.to_string())
            } else {
                Ok(String::new())
            }
        });

        let map = fixture.use_case(source).execute(true).await.unwrap();

        assert_eq!(map.get(EntityRef::new(Category::Anime, 7)), Some("/7.jpg"));
        assert_eq!(map.get(EntityRef::new(Category::Anime, 1)), None);
        assert_eq!(fixture.handle.snapshot(), map);
        assert_eq!(fixture.notifier.messages(), vec![CACHE_CLEARED_NOTICE]);
    }

    #[tokio::test]
    async fn test_clear_with_failed_reload_leaves_empty_map() {
        let fixture = Fixture::with_cached_map().await;
        let mut source = MockListSourcePort::new();
        source
            .expect_fetch_list()
            .returning(|url| Err(NetworkError::timeout(url)));

        let map = fixture.use_case(source).execute(false).await.unwrap();

        assert!(map.is_empty());
        assert!(fixture.handle.snapshot().is_empty());
        assert!(fixture.store.read().await.unwrap().is_none());
        assert_eq!(fixture.notifier.messages(), vec![REBUILD_FAILED_NOTICE]);
    }

    #[tokio::test]
    async fn test_clear_failure_keeps_session_map() {
        let fixture = Fixture::with_cached_map().await;
        fixture.storage.set_fail_writes(true);
        let mut source = MockListSourcePort::new();
        source.expect_fetch_list().never();

        let result = fixture.use_case(source).execute(true).await;

        assert!(result.is_err());
        assert_eq!(fixture.handle.snapshot().len(), 1);
        assert!(fixture.notifier.messages().is_empty());
    }
}
