//! Domain entity definitions.

mod cache_record;
mod category;
mod entity_ref;
mod image_map;

pub use cache_record::CacheRecord;
pub use category::{Category, UnknownCategory};
pub use entity_ref::EntityRef;
pub use image_map::{CoverPaths, ImageMap};
