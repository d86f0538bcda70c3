//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Video portal settings
    #[serde(default)]
    pub portal: PortalConfig,

    /// Course catalogue settings
    #[serde(default)]
    pub catalogue: CatalogueConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::config("crawler.max_concurrent must be > 0"));
        }
        if self.portal.root_url.trim().is_empty() {
            return Err(AppError::config("portal.root_url is empty"));
        }
        if !self.catalogue.search_url.contains("{semkez}") {
            return Err(AppError::config(
                "catalogue.search_url must contain a {semkez} placeholder",
            ));
        }
        if self.catalogue.first_year > self.catalogue.last_year {
            return Err(AppError::config(
                "catalogue.first_year must not exceed catalogue.last_year",
            ));
        }
        if self.catalogue.departments.is_empty() {
            return Err(AppError::config("No catalogue departments defined"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            portal: PortalConfig::default(),
            catalogue: CatalogueConfig::default(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Referer header for HTTP requests
    #[serde(default = "defaults::referer")]
    pub referer: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum concurrent requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            referer: defaults::referer(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Video portal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Institution root page listing department links
    #[serde(default = "defaults::portal_root")]
    pub root_url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            root_url: defaults::portal_root(),
        }
    }
}

/// Course catalogue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueConfig {
    /// Search URL template; `{semkez}` is replaced by `<year><W|S>`
    #[serde(default = "defaults::catalogue_search_url")]
    pub search_url: String,

    /// First academic year of the query grid (inclusive)
    #[serde(default = "defaults::first_year")]
    pub first_year: u16,

    /// Last academic year of the query grid (inclusive)
    #[serde(default = "defaults::last_year")]
    pub last_year: u16,

    /// Course-type marker a row must carry to count as a lecture
    #[serde(default = "defaults::lecture_marker")]
    pub lecture_marker: String,

    /// Department display name to portal code mappings
    #[serde(default = "defaults::default_departments")]
    pub departments: Vec<DepartmentMapping>,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            search_url: defaults::catalogue_search_url(),
            first_year: defaults::first_year(),
            last_year: defaults::last_year(),
            lecture_marker: defaults::lecture_marker(),
            departments: defaults::default_departments(),
        }
    }
}

/// Mapping from a catalogue department display name to its portal code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentMapping {
    /// Display name as printed in the catalogue results table
    pub name: String,

    /// Portal department code (e.g., "d-phys")
    pub code: String,
}

mod defaults {
    use super::DepartmentMapping;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/97.0.4692.71 Safari/537.36"
            .into()
    }
    pub fn referer() -> String {
        "https://example.com/".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn max_concurrent() -> usize {
        5
    }

    // Portal defaults
    pub fn portal_root() -> String {
        "https://video.ethz.ch/".into()
    }

    // Catalogue defaults
    pub fn catalogue_search_url() -> String {
        "https://www.vvz.ethz.ch/Vorlesungsverzeichnis/sucheDozierende.view?lang=en&search=on\
         &semkez={semkez}&stammDeptId=&famname=&rufname=&studiengangTyp=&deptId=\
         &studiengangAbschnittId=&search=Search"
            .into()
    }
    pub fn first_year() -> u16 {
        2011
    }
    pub fn last_year() -> u16 {
        2024
    }
    pub fn lecture_marker() -> String {
        "V".into()
    }

    pub fn default_departments() -> Vec<DepartmentMapping> {
        let entries = [
            ("Architecture", "d-arch"),
            ("Civil, Environmental and Geomatic Engineering", "d-baug"),
            ("Biosystems Science and Engineering", "d-bsse"),
            ("Computer Science", "d-infk"),
            (
                "Information Technology and Electrical Engineering",
                "d-itet",
            ),
            ("Mechanical and Process Engineering", "d-mavt"),
            ("Materials", "d-matl"),
            ("Biology", "d-biol"),
            ("Chemistry and Applied Biosciences", "d-chab"),
            ("Mathematics", "d-math"),
            ("Physics", "d-phys"),
            ("Earth Sciences", "d-erdw"),
            ("Environmental Systems Science", "d-usys"),
            ("Health Sciences and Technology", "d-hest"),
            ("Management, Technology and Economics", "d-mtec"),
            ("Humanities, Social and Political Sciences", "d-gess"),
        ];

        entries
            .iter()
            .map(|(name, code)| DepartmentMapping {
                name: (*name).to_string(),
                code: (*code).to_string(),
            })
            .collect()
    }
}
