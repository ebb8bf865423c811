//! HTTP adapters.

mod list_client;

pub use list_client::{DEFAULT_TIMEOUT, HttpListClient};
