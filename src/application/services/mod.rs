//! Stateful application services shared by the use cases.

pub mod cache_store;
pub mod image_map_handle;
pub mod preferences;

pub use cache_store::CacheStore;
pub use image_map_handle::ImageMapHandle;
pub use preferences::Preferences;
