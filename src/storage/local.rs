//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── series.json      # portal harvest snapshot
//! └── catalogue.json   # course catalogue snapshot
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{CourseRecord, HarvestOutcome};
use crate::storage::{CatalogueSnapshot, DatasetStorage, SeriesSnapshot, WriteMetadata};

const SERIES_KEY: &str = "series.json";
const CATALOGUE_KEY: &str = "catalogue.json";

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read JSON data, returning None if the file doesn't exist.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl DatasetStorage for LocalStorage {
    async fn write_series(&self, outcome: &HarvestOutcome) -> Result<WriteMetadata> {
        let snapshot = SeriesSnapshot {
            updated_at: Utc::now(),
            count: outcome.series.len(),
            series: outcome.series.clone(),
        };
        self.write_json(SERIES_KEY, &snapshot).await?;

        Ok(WriteMetadata {
            count: snapshot.count,
            location: self.path(SERIES_KEY).display().to_string(),
            timestamp: snapshot.updated_at,
        })
    }

    async fn write_catalogue(&self, courses: &[CourseRecord]) -> Result<WriteMetadata> {
        let snapshot = CatalogueSnapshot {
            updated_at: Utc::now(),
            count: courses.len(),
            courses: courses.to_vec(),
        };
        self.write_json(CATALOGUE_KEY, &snapshot).await?;

        Ok(WriteMetadata {
            count: snapshot.count,
            location: self.path(CATALOGUE_KEY).display().to_string(),
            timestamp: snapshot.updated_at,
        })
    }

    async fn load_series(&self) -> Result<Option<SeriesSnapshot>> {
        self.read_json(SERIES_KEY).await
    }

    async fn load_catalogue(&self) -> Result<Option<CatalogueSnapshot>> {
        self.read_json(CATALOGUE_KEY).await
    }
}
