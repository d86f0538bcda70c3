// src/services/fetch.rs

//! HTTP fetch boundary.
//!
//! Resolves a URL to a parsed document or a typed failure. One shared client
//! carries the fixed request header set (user agent, referer) and the
//! per-fetch timeout; it is constructed once per run and passed explicitly to
//! every service that fetches.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use scraper::Html;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    let referer = HeaderValue::from_str(&config.referer)
        .map_err(|e| AppError::config(format!("invalid crawler.referer: {e}")))?;
    headers.insert(REFERER, referer);

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a URL, failing on non-success status codes.
async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::status(url, status.as_u16()));
    }
    Ok(response.text().await?)
}

/// Fetch a page and parse it as HTML.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<Html> {
    let text = fetch_text(client, url).await?;
    Ok(Html::parse_document(&text))
}

/// Fetch a URL and parse the body as JSON.
pub async fn fetch_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    let text = fetch_text(client, url).await?;
    Ok(serde_json::from_str(&text)?)
}
