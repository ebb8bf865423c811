//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::application::dto::{DEFAULT_ANIME_LIST_URL, DEFAULT_MANGA_LIST_URL};
use crate::domain::services::DEFAULT_CDN_BASE;

pub(super) const APP_QUALIFIER: &str = "";
pub(super) const APP_ORGANIZATION: &str = "";
pub(super) const APP_NAME: &str = "mal-covers";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    #[default]
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Cover list and CDN endpoints.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Persisted cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Notification settings.
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Remote endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Anime cover list URL.
    #[serde(default = "default_anime_list_url")]
    pub anime_list_url: String,

    /// Manga cover list URL.
    #[serde(default = "default_manga_list_url")]
    pub manga_list_url: String,

    /// CDN image root that stored paths are relative to.
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            anime_list_url: default_anime_list_url(),
            manga_list_url: default_manga_list_url(),
            cdn_base_url: default_cdn_base_url(),
        }
    }
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum age of the persisted map in days.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,

    /// Cache directory override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Keep the cache in memory only.
    #[serde(skip)]
    pub ephemeral: bool,
}

impl CacheConfig {
    /// Returns the maximum age as a duration.
    #[must_use]
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.max_age_days))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_days: default_max_age_days(),
            dir: None,
            ephemeral: false,
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds. Zero disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl HttpConfig {
    /// Returns the request timeout, or `None` when disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Show desktop notifications. When false, notices are only logged.
    #[serde(default = "default_true")]
    pub desktop: bool,

    /// Notification duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub duration_secs: u64,
}

impl NotificationsConfig {
    /// Returns the notification duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            desktop: true,
            duration_secs: default_notification_duration(),
        }
    }
}

fn default_anime_list_url() -> String {
    DEFAULT_ANIME_LIST_URL.to_string()
}

fn default_manga_list_url() -> String {
    DEFAULT_MANGA_LIST_URL.to_string()
}

fn default_cdn_base_url() -> String {
    DEFAULT_CDN_BASE.to_string()
}

fn default_max_age_days() -> u32 {
    14
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_notification_duration() -> u64 {
    5
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache.dir = Some(cache_dir.clone());
        }
        if args.ephemeral {
            self.cache.ephemeral = true;
        }
        if args.no_notifications {
            self.notifications.desktop = false;
        }
    }

    /// Returns default cache directory.
    #[must_use]
    pub fn default_cache_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.cache_dir().to_path_buf())
    }

    /// Returns effective cache directory.
    #[must_use]
    pub fn effective_cache_dir(&self) -> Option<PathBuf> {
        self.cache.dir.clone().or_else(Self::default_cache_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::default(),
            sources: SourcesConfig::default(),
            cache: CacheConfig::default(),
            http: HttpConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}
