//! Link to high-resolution cover resolution.

use tracing::trace;

use crate::application::dto::CoverReplacement;
use crate::application::services::ImageMapHandle;
use crate::domain::entities::ImageMap;
use crate::domain::services::{UrlCodec, extract_entity_ref};

/// Resolves page links to absolute cover URLs using the session's map.
#[derive(Clone)]
pub struct ResolveCoverUseCase {
    handle: ImageMapHandle,
    codec: UrlCodec,
}

impl ResolveCoverUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(handle: ImageMapHandle, codec: UrlCodec) -> Self {
        Self { handle, codec }
    }

    /// Returns the cover URL for `link`, or `None` when the link is not an
    /// anime or manga page or no cover is known for it.
    #[must_use]
    pub fn execute(&self, link: &str) -> Option<String> {
        self.resolve_in(&self.handle.snapshot(), link)
    }

    /// Resolves many links against one snapshot of the map.
    #[must_use]
    pub fn plan_all<'a, I>(&self, links: I, lazy: bool) -> Vec<CoverReplacement>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let map = self.handle.snapshot();
        links
            .into_iter()
            .filter_map(|link| {
                self.resolve_in(&map, link)
                    .map(|url| CoverReplacement::new(link, url, lazy))
            })
            .collect()
    }

    fn resolve_in(&self, map: &ImageMap, link: &str) -> Option<String> {
        let entity = extract_entity_ref(link)?;
        let path = map.get(entity)?;
        trace!(%entity, path, "Resolved cover");
        Some(self.codec.expand(path))
    }
}
