//! Cover lookup DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Category;

/// Default anime cover list endpoint.
pub const DEFAULT_ANIME_LIST_URL: &str =
    "https://malscraper.azurewebsites.net/covers/all/anime/presets/animetitle";

/// Default manga cover list endpoint.
pub const DEFAULT_MANGA_LIST_URL: &str =
    "https://malscraper.azurewebsites.net/covers/all/manga/presets/animetitle";

/// Cover list endpoint per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSources {
    /// Anime list URL.
    pub anime: String,
    /// Manga list URL.
    pub manga: String,
}

impl ListSources {
    /// Creates new sources.
    #[must_use]
    pub fn new(anime: impl Into<String>, manga: impl Into<String>) -> Self {
        Self {
            anime: anime.into(),
            manga: manga.into(),
        }
    }

    /// Returns the endpoint of `category`.
    #[must_use]
    pub fn url(&self, category: Category) -> &str {
        match category {
            Category::Anime => &self.anime,
            Category::Manga => &self.manga,
        }
    }
}

impl Default for ListSources {
    fn default() -> Self {
        Self::new(DEFAULT_ANIME_LIST_URL, DEFAULT_MANGA_LIST_URL)
    }
}

/// Attribute changes to apply to a cover image element.
///
/// `srcset` is always cleared so the browser does not pick a low-resolution
/// candidate. When the element is lazily loaded its deferred attributes are
/// overwritten too, otherwise the loader would restore the old cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverReplacement {
    /// Link the element belongs to.
    pub link: String,
    /// New `src`.
    pub src: String,
    /// New `srcset`.
    pub srcset: String,
    /// New `data-src`, for lazily loaded elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_src: Option<String>,
    /// New `data-srcset`, for lazily loaded elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_srcset: Option<String>,
}

impl CoverReplacement {
    /// Builds the replacement for an element showing `link`.
    #[must_use]
    pub fn new(link: impl Into<String>, url: String, lazy: bool) -> Self {
        let (data_src, data_srcset) = if lazy {
            (Some(url.clone()), Some(String::new()))
        } else {
            (None, None)
        };

        Self {
            link: link.into(),
            src: url,
            srcset: String::new(),
            data_src,
            data_srcset,
        }
    }
}

/// Snapshot of the persisted cache for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    /// Whether cover replacement is enabled.
    pub enabled: bool,
    /// Write time of the persisted record, if any.
    pub written_at: Option<DateTime<Utc>>,
    /// Whether the record is past its maximum age.
    pub expired: bool,
    /// Stored cache format marker.
    pub version: Option<u32>,
    /// Cached anime covers.
    pub anime: usize,
    /// Cached manga covers.
    pub manga: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eager_replacement() {
        let r = CoverReplacement::new("/anime/1/x", "https://cdn/1.jpg".to_string(), false);
        assert_eq!(r.src, "https://cdn/1.jpg");
        assert!(r.srcset.is_empty());
        assert_eq!(r.data_src, None);

        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("data_src").is_none());
    }

    #[test]
    fn test_lazy_replacement_overwrites_deferred_source() {
        let r = CoverReplacement::new("/anime/1/x", "https://cdn/1.jpg".to_string(), true);
        assert_eq!(r.data_src.as_deref(), Some("https://cdn/1.jpg"));
        assert_eq!(r.data_srcset.as_deref(), Some(""));
    }

    #[test]
    fn test_sources_by_category() {
        let sources = ListSources::default();
        assert!(sources.url(Category::Anime).contains("/anime/"));
        assert!(sources.url(Category::Manga).contains("/manga/"));
    }
}
