use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "mal-covers",
    version,
    about = "Resolve high-resolution MyAnimeList covers from a cached image map",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true, env = "MAL_COVERS_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Cache directory.
    #[arg(long, value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Keep the cache in memory for this run only.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Only log notices instead of showing desktop notifications.
    #[arg(long, global = true)]
    pub no_notifications: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load the image map, rebuilding it if missing or stale.
    Refresh {
        /// Rebuild even if the cached map is fresh.
        #[arg(long)]
        force: bool,
    },

    /// Clear the cached image map and rebuild it.
    Clear {
        /// Do not show the confirmation notice.
        #[arg(long)]
        quiet: bool,
    },

    /// Print the cover URL for each page link.
    Resolve {
        /// Page links such as https://myanimelist.net/anime/5114/...
        #[arg(required = true)]
        links: Vec<String>,

        /// Also overwrite lazy-load attributes.
        #[arg(long)]
        lazy: bool,

        /// Print replacements as JSON lines.
        #[arg(long)]
        json: bool,
    },

    /// Read page links from stdin, one per line, and print replacements.
    Rewrite {
        /// Also overwrite lazy-load attributes.
        #[arg(long)]
        lazy: bool,

        /// Print replacements as JSON lines.
        #[arg(long)]
        json: bool,
    },

    /// Show cache state.
    Status,

    /// Enable cover replacement.
    Enable,

    /// Disable cover replacement.
    Disable,
}
