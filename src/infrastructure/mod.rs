//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Cover list download.
pub mod http;
/// User-facing notices.
pub mod notifications;
/// Key-value storage adapters.
pub mod storage;

pub use config::{AppConfig, CliArgs, Command, ConfigManager, LogLevel};
pub use http::HttpListClient;
pub use notifications::{DesktopNotificationService, LogNotificationService};
pub use storage::{FileStorage, MemoryStorage};
