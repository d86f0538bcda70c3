//! Utility functions and helpers.

pub mod url;

pub use url::{descriptor_url, raw_segment, resolve_url, strip_extension};
