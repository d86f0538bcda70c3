// src/services/portal.rs

//! Portal crawler service.
//!
//! Walks the department → year → semester → series hierarchy with the link
//! classifier, then enriches every discovered series from its sidecar
//! descriptor. Sibling fetches at one level run concurrently, bounded by
//! `crawler.max_concurrent`; a failed branch is logged and skipped, never
//! fatal. The final link set is flat and deduplicated; branch structure is
//! not retained.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::models::{Config, CrawlFailure, HarvestOutcome, SeriesRecord};
use crate::services::descriptor::{self, SeriesDescriptor};
use crate::services::fetch;
use crate::services::links;
use crate::utils::descriptor_url;

/// Unique series links discovered by one crawl, plus branch failure count.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Deduplicated series page URLs in discovery order
    pub links: Vec<String>,

    /// Branches dropped because their page could not be fetched or parsed
    pub branch_failures: usize,
}

/// Service for crawling the video portal.
pub struct PortalCrawler {
    config: Arc<Config>,
    client: Client,
}

impl PortalCrawler {
    /// Create a new portal crawler sharing one HTTP client for the run.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Discover all series links reachable from the configured portal root.
    ///
    /// A failure on the root page itself is fatal; everything below it
    /// degrades per branch.
    pub async fn discover_all(&self) -> Result<Discovery> {
        let root = Url::parse(&self.config.portal.root_url)?;
        let doc = fetch::fetch_page(&self.client, root.as_str()).await?;
        let departments = links::department_links(&doc, &root);
        drop(doc);

        log::info!("Discovered {} department pages", departments.len());
        self.discover_below(departments).await
    }

    /// Discover all series links under a single department page.
    pub async fn discover_department(&self, department_url: &str) -> Result<Discovery> {
        self.discover_below(vec![department_url.to_string()]).await
    }

    async fn discover_below(&self, departments: Vec<String>) -> Result<Discovery> {
        let mut discovery = Discovery::default();

        let years = self
            .expand_level(departments, links::year_links, &mut discovery.branch_failures)
            .await;
        log::info!("Discovered {} year pages", years.len());

        let semesters = self
            .expand_level(years, links::semester_links, &mut discovery.branch_failures)
            .await;
        log::info!("Discovered {} semester pages", semesters.len());

        discovery.links = self
            .expand_level(
                semesters,
                links::recording_links,
                &mut discovery.branch_failures,
            )
            .await;
        log::info!("Discovered {} unique series links", discovery.links.len());

        Ok(discovery)
    }

    /// Fetch every parent page concurrently and union the classified child
    /// links into one deduplicated list.
    async fn expand_level(
        &self,
        parents: Vec<String>,
        classify: fn(&Html, &Url) -> Vec<String>,
        branch_failures: &mut usize,
    ) -> Vec<String> {
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);
        let concurrency = self.config.crawler.max_concurrent.max(1);

        let mut branch_stream = stream::iter(parents)
            .map(|parent| async move {
                let result = self.classify_children(&parent, classify).await;
                (parent, result)
            })
            .buffer_unordered(concurrency);

        let mut seen = HashSet::new();
        let mut children = Vec::new();

        while let Some((parent, result)) = branch_stream.next().await {
            match result {
                Ok(found) => {
                    for link in found {
                        if seen.insert(link.clone()) {
                            children.push(link);
                        }
                    }
                }
                Err(error) => {
                    *branch_failures += 1;
                    log::warn!("Skipping branch {parent}: {error}");
                }
            }

            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }

        children
    }

    /// Fetch one page and apply the level's classifier to it.
    async fn classify_children(
        &self,
        parent: &str,
        classify: fn(&Html, &Url) -> Vec<String>,
    ) -> Result<Vec<String>> {
        let base = Url::parse(parent)?;
        let doc = fetch::fetch_page(&self.client, base.as_str()).await?;
        Ok(classify(&doc, &base))
    }

    /// Fetch and extract metadata for every discovered series link.
    ///
    /// Each link is independent; failures are recorded per series and never
    /// abort the batch.
    pub async fn fetch_metadata(
        &self,
        series_links: Vec<String>,
    ) -> (Vec<SeriesRecord>, Vec<CrawlFailure>) {
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);
        let concurrency = self.config.crawler.max_concurrent.max(1);

        let mut metadata_stream = stream::iter(series_links)
            .map(|link| async move {
                let result = self.fetch_series(&link).await;
                (link, result)
            })
            .buffer_unordered(concurrency);

        let mut records = Vec::new();
        let mut failures = Vec::new();

        while let Some((link, result)) = metadata_stream.next().await {
            match result {
                Ok(record) => records.push(record),
                Err(error) => {
                    log::warn!("Failed to extract metadata for {link}: {error}");
                    failures.push(CrawlFailure {
                        link,
                        cause: error.to_string(),
                    });
                }
            }

            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }

        (records, failures)
    }

    /// Fetch one series descriptor and build its record.
    async fn fetch_series(&self, series_url: &str) -> Result<SeriesRecord> {
        let url = descriptor_url(series_url);
        let parsed: SeriesDescriptor = fetch::fetch_json(&self.client, &url).await?;
        descriptor::extract_record(series_url, parsed)
    }

    /// Run discovery and metadata extraction end to end.
    pub async fn harvest(&self) -> Result<HarvestOutcome> {
        let discovery = self.discover_all().await?;
        Ok(self.enrich(discovery).await)
    }

    /// Run discovery and metadata extraction for one department.
    pub async fn harvest_department(&self, department_url: &str) -> Result<HarvestOutcome> {
        let discovery = self.discover_department(department_url).await?;
        Ok(self.enrich(discovery).await)
    }

    async fn enrich(&self, discovery: Discovery) -> HarvestOutcome {
        let discovered = discovery.links.len();
        let (series, failures) = self.fetch_metadata(discovery.links).await;

        HarvestOutcome {
            series,
            failures,
            discovered,
            branch_failures: discovery.branch_failures,
        }
    }
}
