//! Shared in-memory image map.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::entities::ImageMap;

/// Cloneable handle to the session's current image map.
///
/// The map is replaced wholesale; readers get an immutable snapshot, so a
/// lookup running during a rebuild keeps seeing the previous map.
#[derive(Debug, Clone, Default)]
pub struct ImageMapHandle {
    current: Arc<RwLock<Arc<ImageMap>>>,
}

impl ImageMapHandle {
    /// Creates a handle holding an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle holding `map`.
    #[must_use]
    pub fn with_map(map: ImageMap) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(map))),
        }
    }

    /// Returns the current map.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ImageMap> {
        self.current.read().clone()
    }

    /// Replaces the current map.
    pub fn replace(&self, map: ImageMap) {
        *self.current.write() = Arc::new(map);
    }

    /// Replaces the current map with an empty one.
    pub fn reset(&self) {
        self.replace(ImageMap::new());
    }
}
