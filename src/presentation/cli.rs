//! Subcommand handlers.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::application::dto::{CacheStatus, CoverReplacement, ListSources};
use crate::application::services::{CacheStore, ImageMapHandle, Preferences};
use crate::application::use_cases::{ClearCacheUseCase, LoadImageMapUseCase, ResolveCoverUseCase};
use crate::domain::entities::{Category, ImageMap};
use crate::domain::ports::{ListSourcePort, NotificationPort, StoragePort};
use crate::domain::services::UrlCodec;
use crate::infrastructure::config::{AppConfig, Command};

const DISABLED: &str = "disabled";

/// Wires the use cases for one session and runs subcommands against them.
pub struct App {
    cache_store: Arc<CacheStore>,
    loader: Arc<LoadImageMapUseCase>,
    clear_cache: ClearCacheUseCase,
    resolver: ResolveCoverUseCase,
    preferences: Preferences,
    handle: ImageMapHandle,
}

impl App {
    /// Builds the session from configuration and adapters.
    #[must_use]
    pub fn new(
        config: &AppConfig,
        storage: Arc<dyn StoragePort>,
        list_source: Arc<dyn ListSourcePort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        let codec = UrlCodec::new(config.sources.cdn_base_url.clone());
        let sources = ListSources::new(
            config.sources.anime_list_url.clone(),
            config.sources.manga_list_url.clone(),
        );
        let notice_duration = config.notifications.duration();

        let cache_store = Arc::new(CacheStore::new(storage.clone(), config.cache.max_age()));
        let handle = ImageMapHandle::new();

        let loader = Arc::new(
            LoadImageMapUseCase::new(
                cache_store.clone(),
                list_source,
                notifier.clone(),
                sources,
                codec.clone(),
            )
            .with_notice_duration(notice_duration),
        );
        let clear_cache =
            ClearCacheUseCase::new(cache_store.clone(), loader.clone(), handle.clone(), notifier)
                .with_notice_duration(notice_duration);
        let resolver = ResolveCoverUseCase::new(handle.clone(), codec);

        Self {
            cache_store,
            loader,
            clear_cache,
            resolver,
            preferences: Preferences::new(storage),
            handle,
        }
    }

    /// Runs `command`, reading stdin and writing to stdout as needed.
    ///
    /// # Errors
    /// Returns error if storage, a forced rebuild or output fails.
    pub async fn run(&self, command: Command) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = std::io::stdout();
        self.dispatch(command, stdin, &mut stdout.lock()).await
    }

    async fn dispatch<R, W>(&self, command: Command, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        match command {
            Command::Refresh { force } => self.refresh(force, out).await,
            Command::Clear { quiet } => {
                let map = self.clear_cache.execute(!quiet).await?;
                write_counts(out, &map)
            }
            Command::Resolve { links, lazy, json } => {
                self.load_if_enabled().await;
                let replacements = self.resolver.plan_all(links.iter().map(String::as_str), lazy);
                write_replacements(out, &replacements, json)
            }
            Command::Rewrite { lazy, json } => self.rewrite(input, out, lazy, json).await,
            Command::Status => {
                let status = self.status().await?;
                write_status(out, &status)
            }
            Command::Enable => {
                self.preferences.set_enabled(true).await?;
                writeln!(out, "enabled")?;
                Ok(())
            }
            Command::Disable => {
                self.preferences.set_enabled(false).await?;
                writeln!(out, "{DISABLED}")?;
                Ok(())
            }
        }
    }

    async fn refresh<W: Write>(&self, force: bool, out: &mut W) -> Result<()> {
        if !self.preferences.is_enabled().await {
            writeln!(out, "{DISABLED}")?;
            return Ok(());
        }

        let map = if force {
            self.loader.rebuild().await?
        } else {
            self.loader.execute().await
        };
        self.handle.replace(map);
        write_counts(out, &self.handle.snapshot())
    }

    /// Resolves each non-empty line of `input` as a page link.
    async fn rewrite<R, W>(&self, input: R, out: &mut W, lazy: bool, json: bool) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        self.load_if_enabled().await;

        let mut lines = input.lines();
        let mut links = Vec::new();
        while let Some(line) = lines.next_line().await? {
            let link = line.trim();
            if !link.is_empty() {
                links.push(link.to_string());
            }
        }

        let replacements = self.resolver.plan_all(links.iter().map(String::as_str), lazy);
        info!(
            links = links.len(),
            resolved = replacements.len(),
            "Rewrote cover links"
        );
        write_replacements(out, &replacements, json)
    }

    /// Loads the map into the session handle unless replacement is disabled.
    async fn load_if_enabled(&self) {
        if self.preferences.is_enabled().await {
            self.handle.replace(self.loader.execute().await);
        } else {
            info!("Cover replacement disabled, skipping image map load");
        }
    }

    async fn status(&self) -> Result<CacheStatus> {
        let record = self.cache_store.read().await?;
        let version = self.cache_store.stored_version().await?;
        let written_at = record.as_ref().map(|r| r.timestamp);
        let (anime, manga) = record.as_ref().map_or((0, 0), |r| {
            (r.data.count(Category::Anime), r.data.count(Category::Manga))
        });

        Ok(CacheStatus {
            enabled: self.preferences.is_enabled().await,
            written_at,
            expired: self.cache_store.is_expired(written_at),
            version,
            anime,
            manga,
        })
    }
}

fn write_counts<W: Write>(out: &mut W, map: &ImageMap) -> Result<()> {
    writeln!(
        out,
        "anime: {}\nmanga: {}",
        map.count(Category::Anime),
        map.count(Category::Manga)
    )?;
    Ok(())
}

fn write_replacements<W: Write>(
    out: &mut W,
    replacements: &[CoverReplacement],
    json: bool,
) -> Result<()> {
    for replacement in replacements {
        if json {
            writeln!(out, "{}", serde_json::to_string(replacement)?)?;
        } else {
            writeln!(out, "{}\t{}", replacement.link, replacement.src)?;
        }
    }
    Ok(())
}

fn write_status<W: Write>(out: &mut W, status: &CacheStatus) -> Result<()> {
    writeln!(out, "enabled: {}", status.enabled)?;
    match status.written_at {
        Some(at) => {
            let age = Utc::now() - at;
            writeln!(
                out,
                "written: {} ({}d {}h ago)",
                at.to_rfc3339(),
                age.num_days(),
                age.num_hours() % 24
            )?;
        }
        None => writeln!(out, "written: never")?,
    }
    writeln!(out, "expired: {}", status.expired)?;
    match status.version {
        Some(version) => writeln!(out, "version: {version}")?,
        None => writeln!(out, "version: none")?,
    }
    writeln!(out, "anime: {}\nmanga: {}", status.anime, status.manga)?;
    Ok(())
}
