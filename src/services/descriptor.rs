// src/services/descriptor.rs

//! Sidecar descriptor parsing and metadata extraction.
//!
//! Every series page has a JSON descriptor at a URL derived from the page
//! URL (see [`crate::utils::descriptor_url`]). Two descriptor generations
//! coexist on the portal: older documents carry `createdBy` at the top
//! level, newer ones nest it under `selectedEpisode`. Both shapes
//! deserialize into one [`SeriesDescriptor`].

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::SeriesRecord;
use crate::utils::raw_segment;

/// Protection token value denoting public access.
const PROTECTION_PUBLIC: &str = "NONE";

/// Parsed series descriptor document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDescriptor {
    pub title: Option<String>,

    pub description: Option<String>,

    /// Access restriction token; `"NONE"` means public
    pub protection: Option<String>,

    /// Episode list; its length is the episode count. Entries are kept
    /// opaque since only the count matters here.
    pub episodes: Option<Vec<serde_json::Value>>,

    /// Creator names, top-level shape
    pub created_by: Option<Creators>,

    /// Nested shape used by newer descriptor versions
    pub selected_episode: Option<SelectedEpisode>,
}

/// Sub-object carrying the creator list in newer descriptors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedEpisode {
    pub created_by: Option<Creators>,
}

/// Creator field, either one name or a list of names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Creators {
    One(String),
    Many(Vec<String>),
}

impl Creators {
    /// Comma-joined creator names.
    pub fn joined(&self) -> String {
        match self {
            Self::One(name) => name.clone(),
            Self::Many(names) => names.join(", "),
        }
    }
}

impl SeriesDescriptor {
    /// Creator names from whichever shape this descriptor carries.
    fn lecturer(&self) -> Option<String> {
        self.created_by
            .as_ref()
            .or_else(|| {
                self.selected_episode
                    .as_ref()
                    .and_then(|e| e.created_by.as_ref())
            })
            .map(Creators::joined)
    }

    /// Whether the protection token marks the series as public.
    fn accessible(&self) -> bool {
        self.protection.as_deref() == Some(PROTECTION_PUBLIC)
    }
}

/// Build a [`SeriesRecord`] from a series URL and its parsed descriptor.
///
/// `department` and `year` come from raw URL segments 4 and 5; a descriptor
/// without an episode list is a schema error for this series.
pub fn extract_record(series_url: &str, descriptor: SeriesDescriptor) -> Result<SeriesRecord> {
    let episode_count = descriptor
        .episodes
        .as_ref()
        .map(Vec::len)
        .ok_or_else(|| AppError::schema(series_url, "descriptor has no episode list"))?;

    let department = raw_segment(series_url, 4)
        .ok_or_else(|| AppError::schema(series_url, "URL has no department segment"))?
        .to_string();
    let year = raw_segment(series_url, 5)
        .ok_or_else(|| AppError::schema(series_url, "URL has no year segment"))?
        .to_string();

    Ok(SeriesRecord {
        lecturer: descriptor.lecturer(),
        accessible: descriptor.accessible(),
        title: descriptor.title,
        description: descriptor.description,
        department,
        year,
        episode_count,
        url: series_url.to_string(),
    })
}
