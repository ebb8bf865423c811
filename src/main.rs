use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use mal_covers::domain::ports::{NotificationPort, StoragePort};
use mal_covers::infrastructure::{
    AppConfig, CliArgs, ConfigManager, DesktopNotificationService, FileStorage, HttpListClient,
    LogNotificationService, MemoryStorage,
};
use mal_covers::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_dir(
            path.parent().map(std::path::Path::to_path_buf).unwrap_or_default(),
        ),
        None => ConfigManager::new()?,
    };
    let mut config = manager.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn create_storage(config: &AppConfig) -> Result<Arc<dyn StoragePort>> {
    if config.cache.ephemeral {
        return Ok(Arc::new(MemoryStorage::new()));
    }

    let dir = config
        .effective_cache_dir()
        .ok_or_else(|| eyre!("failed to determine cache directory"))?;
    Ok(Arc::new(FileStorage::new(dir).await?))
}

fn create_notifier(config: &AppConfig) -> Arc<dyn NotificationPort> {
    if config.notifications.desktop {
        Arc::new(DesktopNotificationService::new(true))
    } else {
        Arc::new(LogNotificationService)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = mal_covers::VERSION, "Starting {}", mal_covers::NAME);

    let storage = create_storage(&config).await?;
    let list_source = Arc::new(HttpListClient::with_options(
        config.http.timeout(),
        config.http.user_agent.as_deref(),
    )?);
    let notifier = create_notifier(&config);

    let app = App::new(&config, storage, list_source, notifier);
    app.run(args.command).await
}
