//! Application layer with services, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Cache store, session map handle and preferences.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{CacheStatus, CoverReplacement, ListSources};
pub use services::{CacheStore, ImageMapHandle, Preferences};
pub use use_cases::{ClearCacheUseCase, LoadImageMapUseCase, ResolveCoverUseCase};
