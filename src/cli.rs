//! Command-line entry points.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{
    Parser,
    Subcommand,
};
use tokio::net::TcpListener;

use crate::admin::{
    self,
    AdminState,
};
use crate::config::ConfigManager;
use crate::controller::{
    RefreshOutcome,
    SystemClock,
    TranslationCacheController,
};
use crate::fetcher::HttpTranslationFetcher;
use crate::resolver::StringResolver;
use crate::store::{
    FileKeyValueStore,
    TranslationStore,
};
use crate::types::LanguageCode;

#[derive(Debug, Parser)]
#[command(name = "club-i18n", version, about = "Bilingual UI string cache for the club app")]
pub struct Cli {
    /// Directory containing `.club-i18n.json`
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the translation admin service
    Serve,
    /// Refresh the local cache from the configured endpoint
    Refresh {
        /// Fetch even if the cache is younger than 24 hours
        #[arg(long)]
        force: bool,
    },
    /// Print the resolved strings for a language as JSON
    Show {
        #[arg(long, default_value = "en")]
        lang: LanguageCode,
    },
    /// Drop all cached translations
    Clear,
}

/// Runs one CLI command to completion.
///
/// A failed refresh is logged and not reported as an error: cached or
/// default strings stay in use.
pub async fn run(cli: Cli) -> Result<(), crate::Error> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(cli.config_dir))?;
    let settings = config_manager.get_settings();

    match cli.command {
        Command::Serve => {
            let source_path = config_manager.resolve_path(&settings.admin.source_path);
            let store = open_store(source_path).await;
            let listener = TcpListener::bind(&settings.admin.bind_address).await?;
            admin::serve(listener, AdminState::new(store, Arc::new(SystemClock))).await?;
        }
        Command::Refresh { force } => {
            let store = open_store(config_manager.resolve_path(&settings.cache_path)).await;
            let fetcher = HttpTranslationFetcher::from_settings(settings)?;
            let controller =
                TranslationCacheController::new(store, Arc::new(fetcher), Arc::new(SystemClock));

            match controller.ensure_fresh(force).await {
                Ok(RefreshOutcome::CacheHit) => tracing::info!("Translations are up to date"),
                Ok(RefreshOutcome::Refreshed(timestamp)) => {
                    tracing::info!(timestamp, "Translations refreshed");
                }
                Err(error) => tracing::warn!(%error, "Refresh failed, cached strings remain in use"),
            }
        }
        Command::Show { lang } => {
            let store = open_store(config_manager.resolve_path(&settings.cache_path)).await;
            let table = StringResolver::new(store).resolve(lang).await;
            print_json(&serde_json::to_string_pretty(&table)?);
        }
        Command::Clear => {
            let store = open_store(config_manager.resolve_path(&settings.cache_path)).await;
            store.clear().await?;
        }
    }

    Ok(())
}

/// Opens a file-backed store at `path`.
async fn open_store(path: PathBuf) -> Arc<TranslationStore> {
    tracing::debug!(path = %path.display(), "Opening translation store");
    Arc::new(TranslationStore::open(Arc::new(FileKeyValueStore::new(path))).await)
}

/// Writes command output to stdout.
#[allow(clippy::print_stdout)]
fn print_json(json: &str) {
    println!("{json}");
}
