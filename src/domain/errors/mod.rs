//! Domain error types.

mod network_error;
mod rebuild_error;
mod storage_error;

pub use network_error::NetworkError;
pub use rebuild_error::RebuildError;
pub use storage_error::StorageError;
