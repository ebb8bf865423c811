//! Category and id to compressed cover path mapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Category, EntityRef};

/// Covers for a single category, keyed by entity id.
pub type CoverPaths = HashMap<u64, String>;

/// Mapping from (category, id) to a compressed cover path.
///
/// Both categories always exist, so lookups never fail on a missing
/// namespace. The persisted JSON shape is
/// `{"anime": {"5114": "/5114.jpg"}, "manga": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMap {
    #[serde(default)]
    anime: CoverPaths,
    #[serde(default)]
    manga: CoverPaths,
}

impl ImageMap {
    /// Creates a map with both categories empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the covers of one category.
    #[must_use]
    pub const fn category(&self, category: Category) -> &CoverPaths {
        match category {
            Category::Anime => &self.anime,
            Category::Manga => &self.manga,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut CoverPaths {
        match category {
            Category::Anime => &mut self.anime,
            Category::Manga => &mut self.manga,
        }
    }

    /// Looks up the stored path for an entity. Empty paths count as absent.
    #[must_use]
    pub fn get(&self, entity: EntityRef) -> Option<&str> {
        self.category(entity.category)
            .get(&entity.id)
            .map(String::as_str)
            .filter(|path| !path.is_empty())
    }

    /// Stores a path, replacing any previous one for the same entity.
    pub fn insert(&mut self, entity: EntityRef, path: impl Into<String>) {
        self.category_mut(entity.category)
            .insert(entity.id, path.into());
    }

    /// Number of entries in one category.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.category(category).len()
    }

    /// Number of entries across both categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anime.len() + self.manga.len()
    }

    /// Returns true if neither category has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_has_both_categories() {
        let map = ImageMap::new();
        assert!(map.is_empty());
        assert!(map.category(Category::Anime).is_empty());
        assert!(map.category(Category::Manga).is_empty());
        assert_eq!(map.get(EntityRef::new(Category::Anime, 1)), None);
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = ImageMap::new();
        map.insert(EntityRef::new(Category::Anime, 5114), "/anime/1223/96541.jpg");
        map.insert(EntityRef::new(Category::Manga, 2), "/manga/1/157897.jpg");

        assert_eq!(
            map.get(EntityRef::new(Category::Anime, 5114)),
            Some("/anime/1223/96541.jpg")
        );
        assert_eq!(map.get(EntityRef::new(Category::Manga, 5114)), None);
        assert_eq!(map.count(Category::Anime), 1);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_path_is_absent() {
        let mut map = ImageMap::new();
        map.insert(EntityRef::new(Category::Anime, 7), "");
        assert_eq!(map.get(EntityRef::new(Category::Anime, 7)), None);
    }

    #[test]
    fn test_json_shape() {
        let mut map = ImageMap::new();
        map.insert(EntityRef::new(Category::Anime, 5114), "/5114.jpg");

        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value["anime"]["5114"], "/5114.jpg");
        assert!(value["manga"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_missing_category_deserializes_empty() {
        let map: ImageMap = serde_json::from_str(r#"{"anime":{"1":"/1.jpg"}}"#).unwrap();
        assert_eq!(map.count(Category::Anime), 1);
        assert!(map.category(Category::Manga).is_empty());
    }
}
