use std::fmt;

use super::Category;

/// Key of a cover entry, derived from a page link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// Lookup namespace.
    pub category: Category,
    /// Numeric entity id.
    pub id: u64,
}

impl EntityRef {
    /// Creates a new reference.
    #[must_use]
    pub const fn new(category: Category, id: u64) -> Self {
        Self { category, id }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.id)
    }
}
