//! Lectern CLI
//!
//! Local execution entry point for the harvester.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lectern::{
    error::Result,
    models::Config,
    pipeline,
    services::fetch,
    storage::{DatasetStorage, LocalStorage},
};

/// Lectern - Lecture Portal & Course Catalogue Harvester
#[derive(Parser, Debug)]
#[command(
    name = "lectern",
    version,
    about = "Harvests lecture recordings and the course catalogue"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Directory for dataset snapshots
    #[arg(short, long, default_value = "data")]
    output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the video portal and extract series metadata
    Harvest {
        /// Restrict the crawl to one department page URL
        #[arg(long)]
        department: Option<String>,
    },

    /// Scrape the course catalogue year/semester grid
    Catalogue,

    /// Run full pipeline: Harvest → Catalogue
    Pipeline,

    /// Validate the configuration file
    Validate,

    /// Show current snapshot info
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

    log::info!("Lectern starting...");

    let config = Arc::new(Config::load_or_default(&cli.config));
    let storage = LocalStorage::new(&cli.output_dir);

    match cli.command {
        Command::Harvest { department } => {
            config.validate()?;
            let client = fetch::create_client(&config.crawler)?;
            pipeline::run_harvest(Arc::clone(&config), &storage, client, department.as_deref())
                .await?;
        }

        Command::Catalogue => {
            config.validate()?;
            let client = fetch::create_client(&config.crawler)?;
            pipeline::run_catalogue(Arc::clone(&config), &storage, client).await?;
        }

        Command::Pipeline => {
            config.validate()?;
            let client = fetch::create_client(&config.crawler)?;

            log::info!("Step 1/2: Harvesting the portal...");
            pipeline::run_harvest(Arc::clone(&config), &storage, client.clone(), None).await?;

            log::info!("Step 2/2: Scraping the catalogue...");
            pipeline::run_catalogue(Arc::clone(&config), &storage, client).await?;

            log::info!("Pipeline complete!");
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            log::info!("✓ Config OK (portal, catalogue, and crawler settings)");
        }

        Command::Info => {
            log::info!("Output directory: {}", cli.output_dir.display());

            match storage.load_series().await? {
                Some(snapshot) => log::info!(
                    "Series snapshot: {} records, updated {}",
                    snapshot.count,
                    snapshot.updated_at
                ),
                None => log::info!("Series snapshot: not found"),
            }

            match storage.load_catalogue().await? {
                Some(snapshot) => log::info!(
                    "Catalogue snapshot: {} records, updated {}",
                    snapshot.count,
                    snapshot.updated_at
                ),
                None => log::info!("Catalogue snapshot: not found"),
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
