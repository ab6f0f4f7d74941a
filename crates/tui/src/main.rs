mod app;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voyager_core::{
    load_config, load_default_config, validate_config, AdvancedSearchClient, ArchiveSearcher,
    PreferenceStore, SqlitePreferenceStore,
};

use app::App;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging()?;

    // Determine config path; the file is optional unless explicitly set.
    let config = match std::env::var("VOYAGER_CONFIG").map(PathBuf::from) {
        Ok(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => load_default_config().context("Failed to load configuration")?,
    };

    validate_config(&config).context("Configuration validation failed")?;
    info!(version = VERSION, "configuration loaded");

    // Persistence is best-effort end to end: a broken database file
    // degrades to an in-memory session instead of aborting startup.
    let store: Arc<dyn PreferenceStore> = match SqlitePreferenceStore::new(&config.storage.path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                path = ?config.storage.path,
                error = %e,
                "preference database unavailable, falling back to in-memory store"
            );
            Arc::new(
                SqlitePreferenceStore::in_memory()
                    .context("Failed to create in-memory preference store")?,
            )
        }
    };

    let searcher: Arc<dyn ArchiveSearcher> = Arc::new(
        AdvancedSearchClient::new(&config.archive).context("Failed to create search client")?,
    );

    let (app, outcome_rx) = App::new(config, store, searcher);

    let terminal = ratatui::init();
    let result = app.run(terminal, outcome_rx).await;
    ratatui::restore();

    if let Err(ref e) = result {
        error!(error = %e, "application exited with error");
    }
    result
}

/// The terminal is the UI, so logs go to a file instead of stdout.
fn init_logging() -> Result<()> {
    let log_path = std::env::var("VOYAGER_LOG").unwrap_or_else(|_| "voyager.log".to_string());
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .init();

    Ok(())
}
