//! Storage abstractions for dataset persistence.
//!
//! Each harvest replaces the previous snapshot wholesale; keying is by
//! series URL and by full course-record identity, which both hold by
//! construction of the deduplicated datasets.

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CourseRecord, HarvestOutcome, SeriesRecord};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of records written
    pub count: usize,
    /// Where the snapshot landed
    pub location: String,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Snapshot header for the series dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total series count
    pub count: usize,
    /// The series records
    pub series: Vec<SeriesRecord>,
}

/// Snapshot header for the catalogue dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueSnapshot {
    /// ISO 8601 timestamp of last update
    pub updated_at: DateTime<Utc>,
    /// Total course count
    pub count: usize,
    /// The course records
    pub courses: Vec<CourseRecord>,
}

/// Trait for dataset storage backends.
#[async_trait]
pub trait DatasetStorage: Send + Sync {
    /// Replace the series snapshot with the outcome of a harvest run.
    async fn write_series(&self, outcome: &HarvestOutcome) -> Result<WriteMetadata>;

    /// Replace the catalogue snapshot.
    async fn write_catalogue(&self, courses: &[CourseRecord]) -> Result<WriteMetadata>;

    /// Load the current series snapshot, if any.
    async fn load_series(&self) -> Result<Option<SeriesSnapshot>>;

    /// Load the current catalogue snapshot, if any.
    async fn load_catalogue(&self) -> Result<Option<CatalogueSnapshot>>;
}
