//! Domain layer with core entities, pure services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{CacheRecord, Category, EntityRef, ImageMap};
pub use errors::{NetworkError, RebuildError, StorageError};
pub use ports::{ListSourcePort, NotificationPort, StoragePort};
pub use services::UrlCodec;
