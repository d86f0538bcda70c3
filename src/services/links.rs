// src/services/links.rs

//! Link classification for the portal hierarchy.
//!
//! The portal has no listing API and no semantic markup; hierarchy membership
//! is encoded purely in URL path depth and substring conventions. Each level
//! therefore gets a structural pattern match over the anchor hrefs of its
//! parent page. The segment counts and substring conditions below are the
//! site's informal schema; changing them changes which links are found.
//!
//! Several checks run against the raw href string rather than the resolved
//! URL (notably the 4-piece year check and the 6-piece recording check).
//! That mirrors the observed link sets on the live site and is deliberate.

use scraper::{Html, Selector};
use url::Url;

use crate::utils::{raw_segment, resolve_url, strip_extension};

/// Maximum semester links collected per year page. There are at most two
/// semesters per year; this is a hard cap, not a correctness filter.
const SEMESTER_CAP: usize = 2;

/// Collect every anchor href on a document, in document order.
fn anchor_hrefs(doc: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a") else {
        return Vec::new();
    };

    doc.select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Push `link` unless it is already present.
fn push_unique(found: &mut Vec<String>, link: String) {
    if !found.contains(&link) {
        found.push(link);
    }
}

/// Department links on the institution root page.
///
/// An href qualifies iff it contains `lectures/` and resolves to an HTTPS
/// URL.
pub fn department_links(doc: &Html, page_url: &Url) -> Vec<String> {
    let mut found = Vec::new();

    for href in anchor_hrefs(doc) {
        if !href.contains("lectures/") {
            continue;
        }

        let resolved = resolve_url(page_url, &href);
        let is_secure = Url::parse(&resolved)
            .map(|u| u.scheme() == "https")
            .unwrap_or(false);
        if is_secure {
            push_unique(&mut found, resolved);
        }
    }

    found
}

/// Year links on a department page.
///
/// The department code is raw segment 4 of the department URL with its
/// extension stripped. An href qualifies iff it contains
/// `/lectures/<code>/`, ends in `.html`, and splits on `/` into exactly 4
/// pieces. The piece count is checked on the raw href, not the resolved URL.
pub fn year_links(doc: &Html, department_url: &Url) -> Vec<String> {
    let dept = department_url.as_str();
    let Some(code) = raw_segment(dept, 4).map(strip_extension) else {
        return Vec::new();
    };
    let needle = format!("/lectures/{code}/");

    let mut found = Vec::new();
    for href in anchor_hrefs(doc) {
        if href.contains(&needle) && href.ends_with(".html") && href.split('/').count() == 4 {
            push_unique(&mut found, resolve_url(department_url, &href));
        }
    }

    found
}

/// Semester links on a year page.
///
/// Matches are re-synthesized as `<year-url-without-extension>/spring.html`
/// (resp. `autumn.html`) instead of resolving the href itself. Collection
/// stops after [`SEMESTER_CAP`] distinct links; a semester repeated on the
/// page cannot occupy both slots.
pub fn semester_links(doc: &Html, year_url: &Url) -> Vec<String> {
    let base = year_url.as_str();
    let base = base.strip_suffix(".html").unwrap_or(base);

    let mut found = Vec::new();
    for href in anchor_hrefs(doc) {
        if found.len() >= SEMESTER_CAP {
            break;
        }

        if href.contains("spring.html") {
            push_unique(&mut found, format!("{base}/spring.html"));
        } else if href.contains("autumn.html") {
            push_unique(&mut found, format!("{base}/autumn.html"));
        }
    }

    found
}

/// Recording series links on a semester page.
///
/// The department code is raw segment 4 of the semester URL. An href
/// qualifies iff it contains the code and splits on `/` into exactly 6
/// pieces (again checked on the raw href).
pub fn recording_links(doc: &Html, semester_url: &Url) -> Vec<String> {
    let Some(code) = raw_segment(semester_url.as_str(), 4).map(strip_extension) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    for href in anchor_hrefs(doc) {
        if href.split('/').count() == 6 && href.contains(code) {
            push_unique(&mut found, resolve_url(semester_url, &href));
        }
    }

    found
}
