//! Pipeline entry points for harvester operations.
//!
//! - `run_harvest`: crawl the portal and extract series metadata
//! - `run_catalogue`: scrape the course catalogue grid

pub mod catalogue;
pub mod harvest;

pub use catalogue::run_catalogue;
pub use harvest::run_harvest;
