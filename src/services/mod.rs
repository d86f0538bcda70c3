// src/services/mod.rs

//! Crawler services.
//!
//! - `fetch`: shared HTTP fetch boundary
//! - `links`: per-level link classification heuristics
//! - `portal`: hierarchical portal crawler and metadata extraction
//! - `descriptor`: sidecar descriptor parsing
//! - `catalogue`: course catalogue correlator

pub mod catalogue;
pub mod descriptor;
pub mod fetch;
pub mod links;
pub mod portal;

pub use catalogue::CatalogueCrawler;
pub use portal::{Discovery, PortalCrawler};
