// src/pipeline/harvest.rs

//! Portal harvest pipeline.

use std::sync::Arc;

use reqwest::Client;

use crate::error::Result;
use crate::models::Config;
use crate::services::PortalCrawler;
use crate::storage::DatasetStorage;

/// Run the portal harvest and persist the series snapshot.
///
/// With `department` set, only that department's subtree is crawled;
/// otherwise discovery starts at the configured portal root. The run never
/// aborts on isolated series failures; they are enumerated at the end.
pub async fn run_harvest(
    config: Arc<Config>,
    storage: &dyn DatasetStorage,
    client: Client,
    department: Option<&str>,
) -> Result<()> {
    log::info!("Starting portal harvest...");

    let crawler = PortalCrawler::new(Arc::clone(&config), client);
    let outcome = match department {
        Some(url) => crawler.harvest_department(url).await?,
        None => crawler.harvest().await?,
    };

    if outcome.branch_failures > 0 {
        log::warn!(
            "{} hierarchy branches were dropped; coverage may be incomplete",
            outcome.branch_failures
        );
    }

    let summary = storage.write_series(&outcome).await?;
    log::info!(
        "Wrote {} series records to {} ({} links discovered)",
        summary.count,
        summary.location,
        outcome.discovered
    );

    if outcome.failures.is_empty() {
        log::info!("Failures: none");
    } else {
        log::warn!("Failures: {}", outcome.failures.len());
        for failure in &outcome.failures {
            log::warn!("  {}: {}", failure.link, failure.cause);
        }
    }

    log::info!("Harvest complete!");
    Ok(())
}
