// src/pipeline/catalogue.rs

//! Course catalogue pipeline.

use std::sync::Arc;

use reqwest::Client;

use crate::error::Result;
use crate::models::Config;
use crate::services::CatalogueCrawler;
use crate::storage::DatasetStorage;

/// Run the catalogue correlator and persist the course snapshot.
pub async fn run_catalogue(
    config: Arc<Config>,
    storage: &dyn DatasetStorage,
    client: Client,
) -> Result<()> {
    log::info!(
        "Starting catalogue scrape for {}-{}...",
        config.catalogue.first_year,
        config.catalogue.last_year
    );

    let crawler = CatalogueCrawler::new(Arc::clone(&config), client);
    let courses = crawler.run().await?;

    let summary = storage.write_catalogue(&courses).await?;
    log::info!(
        "Wrote {} course records to {}",
        summary.count,
        summary.location
    );

    log::info!("Catalogue scrape complete!");
    Ok(())
}
