//! Cover list categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two lookup namespaces served by the cover lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Anime series.
    Anime,
    /// Manga and other serialized works.
    Manga,
}

impl Category {
    /// Returns the token used in page paths and list selectors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anime" => Ok(Self::Anime),
            "manga" => Ok(Self::Manga),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Token that names neither category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);
