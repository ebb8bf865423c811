//! Use case implementations.

mod clear_cache_use_case;
mod load_image_map_use_case;
mod resolve_cover_use_case;

pub use clear_cache_use_case::{CACHE_CLEARED_NOTICE, ClearCacheUseCase};
pub use load_image_map_use_case::{LoadImageMapUseCase, REBUILD_FAILED_NOTICE};
pub use resolve_cover_use_case::ResolveCoverUseCase;
