//! Data transfer objects for the application layer.

mod cover_dto;

pub use cover_dto::{
    CacheStatus, CoverReplacement, DEFAULT_ANIME_LIST_URL, DEFAULT_MANGA_LIST_URL, ListSources,
};
