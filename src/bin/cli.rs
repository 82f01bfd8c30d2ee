// src/bin/cli.rs

//! Campaign digest CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use campaigner::{
    error::{AppError, Result},
    models::Config,
    pipeline::{self, ArticleIndex},
    services::HttpFetcher,
    storage::{LocalStorage, PublishStorage},
};
use chrono::Local;
use clap::{Parser, Subcommand};

/// campaigner - Rakuten campaign digest generator
#[derive(Parser, Debug)]
#[command(
    name = "campaigner",
    version,
    about = "Collects campaign links and publishes affiliate-tagged digests"
)]
struct Cli {
    /// Path to storage directory containing config and data files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch seed pages and save the campaign record store
    Discover,

    /// Publish the saved campaign records as an article
    Publish,

    /// Run full pipeline: Discover → Publish
    Run,

    /// Validate configuration
    Validate,

    /// Show record store and article index info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::info!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Discover => {
            config.validate()?;
            let fetcher = HttpFetcher::new(&config.fetcher)?;
            match pipeline::run_discovery(&config, &fetcher, &storage).await {
                Ok(outcome) => log::info!("Saved {} campaigns", outcome.records.len()),
                Err(AppError::NoCampaignsFound) => {
                    log::warn!("No valid campaigns found after filtering.");
                }
                Err(e) => return Err(e),
            }
        }

        Command::Publish => {
            config.validate()?;
            let now = Local::now().naive_local();
            let outcome = pipeline::run_publish(&config, &storage, now).await?;
            log::info!("Published {}", outcome.article_filename);
        }

        Command::Run => {
            config.validate()?;
            let fetcher = HttpFetcher::new(&config.fetcher)?;
            let now = Local::now().naive_local();
            match pipeline::run_all(&config, &fetcher, &storage, now).await {
                Ok((discovery, publish)) => log::info!(
                    "Published {} with {} of {} campaigns",
                    publish.article_filename,
                    publish.entry_count,
                    discovery.records.len()
                ),
                Err(AppError::NoCampaignsFound) => {
                    log::warn!("No valid campaigns found after filtering. Nothing published.");
                }
                Err(e) => return Err(e),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} sources, {} merchant domains)",
                config.sources.len(),
                config.affiliate.merchant_domains.len()
            );
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());

            match storage.load_records(&config.paths.records_file).await? {
                Some(records) => log::info!("Campaign records: {}", records.len()),
                None => log::info!("No campaign records yet. Run 'discover' first."),
            }

            let index =
                ArticleIndex::from_records(storage.load_index(&config.paths.index_file).await?);
            log::info!("Published articles: {}", index.len());
            if let Some(latest) = index.latest() {
                log::info!("Latest article: {} ({})", latest.title, latest.filename);
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
