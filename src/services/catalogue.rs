// src/services/catalogue.rs

//! Course catalogue correlator service.
//!
//! Iterates the year × semester grid against the catalogue search endpoint
//! and extracts result-table rows into [`CourseRecord`]s. A row counts as a
//! lecture iff its type column carries the configured marker; its department
//! display name must map to a portal code through the fixed lookup table.
//! An unmapped name is fatal for the run: a missing mapping entry is a
//! data-model gap, not a transient fetch error.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{CatalogueConfig, Config, CourseRecord};
use crate::services::fetch;

/// Semester tags of the query grid: winter (autumn) and summer (spring).
const SEMESTER_TAGS: [char; 2] = ['W', 'S'];

/// Service for scraping the course catalogue.
pub struct CatalogueCrawler {
    config: Arc<Config>,
    client: Client,
}

impl CatalogueCrawler {
    /// Create a new catalogue crawler sharing one HTTP client for the run.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Scrape the full year × semester grid into a deduplicated course list.
    ///
    /// A failed fetch for one grid cell is logged and skipped; a schema
    /// error inside a fetched table aborts the run.
    pub async fn run(&self) -> Result<Vec<CourseRecord>> {
        let catalogue = &self.config.catalogue;
        let delay = Duration::from_millis(self.config.crawler.request_delay_ms);

        let mut seen = HashSet::new();
        let mut courses = Vec::new();

        for year in catalogue.first_year..=catalogue.last_year {
            for tag in SEMESTER_TAGS {
                let semkez = format!("{year}{tag}");
                let url = catalogue.search_url.replace("{semkez}", &semkez);

                let doc = match fetch::fetch_page(&self.client, &url).await {
                    Ok(doc) => doc,
                    Err(error) => {
                        log::warn!("Skipping catalogue cell {semkez}: {error}");
                        continue;
                    }
                };

                let rows = extract_rows(&doc, &year.to_string(), catalogue)?;
                drop(doc);

                for course in rows {
                    if seen.insert(course.clone()) {
                        courses.push(course);
                    }
                }

                if delay.as_millis() > 0 {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        log::info!("Catalogue yielded {} unique courses", courses.len());
        Ok(courses)
    }
}

/// Extract lecture rows from one results table.
///
/// Fixed column order: number, title, type, credits, department name.
pub fn extract_rows(
    doc: &Html,
    year: &str,
    catalogue: &CatalogueConfig,
) -> Result<Vec<CourseRecord>> {
    let row_sel = parse_selector("table tr")?;
    let cell_sel = parse_selector("td")?;

    let lookup: HashMap<&str, &str> = catalogue
        .departments
        .iter()
        .map(|d| (d.name.as_str(), d.code.as_str()))
        .collect();

    let mut courses = Vec::new();
    for row in doc.select(&row_sel) {
        let cells: Vec<String> = row
            .select(&cell_sel)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();

        // Header and layout rows have no (or too few) data cells.
        let [number, title, course_type, credits, department_name, ..] = cells.as_slice() else {
            continue;
        };

        if !course_type.contains(&catalogue.lecture_marker) {
            continue;
        }

        let code = lookup.get(department_name.as_str()).ok_or_else(|| {
            AppError::schema(
                format!("catalogue row {number}"),
                format!("unmapped department name '{department_name}'"),
            )
        })?;

        courses.push(CourseRecord {
            number: number.clone(),
            title: title.clone(),
            year: year.to_string(),
            credits: credits.clone(),
            course_type: course_type.clone(),
            department: (*code).to_string(),
        });
    }

    Ok(courses)
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 5]]) -> Html {
        let body: String = rows
            .iter()
            .map(|cells| {
                let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
                format!("<tr>{tds}</tr>")
            })
            .collect();
        Html::parse_document(&format!(
            "<html><body><table>\
             <tr><th>Number</th><th>Title</th><th>Type</th><th>ECTS</th><th>Department</th></tr>\
             {body}</table></body></html>"
        ))
    }

    fn catalogue() -> CatalogueConfig {
        CatalogueConfig::default()
    }

    #[test]
    fn extracts_lecture_rows_with_mapped_department() {
        let doc = table(&[
            ["402-0810-00L", "Computational Quantum Physics", "2V+1U", "8", "Physics"],
            ["401-0000-99L", "Tutoring Only", "1U", "1", "Mathematics"],
        ]);

        let rows = extract_rows(&doc, "2018", &catalogue()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number, "402-0810-00L");
        assert_eq!(rows[0].department, "d-phys");
        assert_eq!(rows[0].year, "2018");
        assert_eq!(rows[0].credits, "8");
    }

    #[test]
    fn unmapped_department_name_is_fatal() {
        let doc = table(&[[
            "000-0001-00L",
            "Course From Nowhere",
            "2V",
            "4",
            "Department of Mystery",
        ]]);

        let err = extract_rows(&doc, "2018", &catalogue()).unwrap_err();
        assert!(matches!(err, AppError::Schema { .. }));
    }

    #[test]
    fn header_rows_are_skipped() {
        let doc = table(&[]);
        assert!(extract_rows(&doc, "2018", &catalogue()).unwrap().is_empty());
    }

    #[test]
    fn non_lecture_rows_are_filtered_before_the_mapping_check() {
        // Recitation row with an unmapped department must not trip the
        // schema check since it is filtered out first.
        let doc = table(&[[
            "000-0002-00L",
            "Exercise Session",
            "1U",
            "1",
            "Department of Mystery",
        ]]);

        assert!(extract_rows(&doc, "2018", &catalogue()).unwrap().is_empty());
    }
}
