// src/models/mod.rs

//! Domain models for the harvester application.

mod config;
mod course;
mod series;

pub use config::{CatalogueConfig, Config, CrawlerConfig, DepartmentMapping, PortalConfig};
pub use course::CourseRecord;
pub use series::SeriesRecord;

use serde::{Deserialize, Serialize};

/// A per-series failure recorded during the metadata stage.
///
/// Appended whenever the fetch or parse for one series fails; never blocks
/// processing of the remaining links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlFailure {
    /// Series page URL that failed
    pub link: String,

    /// Underlying cause, rendered for the final report
    pub cause: String,
}

/// Summary of a portal harvest run.
#[derive(Debug, Default)]
pub struct HarvestOutcome {
    /// Successfully extracted series records
    pub series: Vec<SeriesRecord>,

    /// Per-series metadata failures
    pub failures: Vec<CrawlFailure>,

    /// Unique series links discovered by the crawler
    pub discovered: usize,

    /// Department/year/semester branches that yielded no links due to a
    /// fetch failure (logged as warnings during the run)
    pub branch_failures: usize,
}
