// src/utils/url.rs

//! URL manipulation utilities.
//!
//! The portal encodes its hierarchy purely through URL path depth and
//! substring conventions, so several helpers here operate on the raw URL
//! string split on `/` rather than on a parsed path. That raw-segment view
//! is the site's informal schema and must not be "fixed" to parsed-path
//! semantics: segment 4 of the full URL string is the department code,
//! segment 5 the year.

use url::Url;

/// Suffix appended to an extension-less series URL to reach its descriptor.
pub const DESCRIPTOR_SUFFIX: &str = ".series-metadata.json";

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Segment of the raw URL string at `index`, counting scheme and host.
///
/// `https://video.example/lectures/d-phys/2018/autumn/001.html` split on `/`
/// yields `["https:", "", "video.example", "lectures", "d-phys", ...]`, so
/// index 4 is the department code and index 5 the year.
pub fn raw_segment(url: &str, index: usize) -> Option<&str> {
    url.split('/').nth(index)
}

/// Strip a trailing extension from a path segment (`d-phys.html` → `d-phys`).
pub fn strip_extension(segment: &str) -> &str {
    segment.split('.').next().unwrap_or(segment)
}

/// Derive the sidecar descriptor URL for a series page URL.
///
/// `strip_suffix(url, ".html") + ".series-metadata.json"`, bit-exact: the
/// persistence key round-trips through this derivation.
pub fn descriptor_url(series_url: &str) -> String {
    let base = series_url.strip_suffix(".html").unwrap_or(series_url);
    format!("{base}{DESCRIPTOR_SUFFIX}")
}
