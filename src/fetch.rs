//! The HTTP-fetch seam shared by both sources.
//!
//! A [`Page`] is a fully read response: status, final URL and raw body. The
//! status is recorded but never enforced; a 4xx or 5xx page with a body is
//! handed to the parsers like any other.

use reqwest::{Client as HttpClient, StatusCode};
use thiserror::Error;

/// Errors raised while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, timeout or body read failure.
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured endpoint is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// A fetched HTTP response with its body read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL the response was served from, after redirects, with any `key`
    /// query parameter masked.
    pub url: String,
    /// Response status code.
    pub status: u16,
    /// Raw response body.
    pub content: Vec<u8>,
}

impl Page {
    /// Creates a page from its parts. Mostly useful for fixtures.
    pub fn new(url: impl Into<String>, status: u16, content: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            content: content.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Issues a GET request and reads the whole body.
pub async fn fetch_page(
    http_client: &HttpClient,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Page, FetchError> {
    let mut url =
        reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    tracing::debug!(url = %redact_key(&url), "fetching page");

    let response = http_client.get(url).send().await?;

    let status = response.status();
    let final_url = redact_key(response.url());
    if !status.is_success() {
        log_unexpected_status(&final_url, status);
    }

    let content = response.bytes().await?.to_vec();
    tracing::debug!(url = %final_url, status = status.as_u16(), bytes = content.len(), "page fetched");

    Ok(Page {
        url: final_url,
        status: status.as_u16(),
        content,
    })
}

/// The URL with any `key` parameter masked, for logging.
fn redact_key(url: &reqwest::Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "key") {
        return url.to_string();
    }

    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

fn log_unexpected_status(url: &str, status: StatusCode) {
    tracing::warn!(url = %url, status = status.as_u16(), "non-success status, continuing with body");
}
