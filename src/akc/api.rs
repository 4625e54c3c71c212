//! Low-level AKC breed page client and HTML helpers.
//!
//! The breed listing page is a regular HTML document. Breeds are the
//! `<option>` entries of the first `<select>` on the page, preceded by a
//! prompt option reading "Select a Breed".

use reqwest::Client as HttpClient;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::fetch::{self, FetchError, Page};
use crate::HttpClientConfig;

/// The AKC breed listing page.
pub const AKC_BREEDS_URL: &str = "https://www.akc.org/dog-breeds/";

/// Prompt option text, compared against lowercased option text.
pub const PLACEHOLDER: &str = "select a breed";

/// Errors that may occur when fetching or reading the breed page.
#[derive(Debug, Error)]
pub enum AkcError {
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Fetching the page failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A CSS selector failed to parse.
    #[error("Invalid selector '{0}'")]
    Selector(String),

    /// The page has no `<select>` element.
    #[error("No select element found")]
    SelectNotFound,
}

/// One entry of the breed `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedOption {
    /// Display text, exactly as it appears in the document.
    pub label: String,
    /// The `value` attribute, or the label when the attribute is absent.
    pub value: String,
}

impl BreedOption {
    /// Returns `true` if this is the "Select a Breed" prompt.
    pub fn is_placeholder(&self) -> bool {
        is_placeholder(&self.label)
    }
}

/// AKC breed page client.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: HttpClient,
    url: String,
}

impl Client {
    /// Creates a client for the public AKC breed page.
    pub fn new() -> Result<Self, AkcError> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Creates a client with custom HTTP configuration.
    pub fn with_config(config: HttpClientConfig) -> Result<Self, AkcError> {
        Self::with_base_url(AKC_BREEDS_URL, config)
    }

    /// Creates a client that fetches the breed page from `url`.
    ///
    /// This is primarily useful for testing with mock servers.
    pub fn with_base_url(url: &str, config: HttpClientConfig) -> Result<Self, AkcError> {
        Ok(Self {
            http_client: config.build_client()?,
            url: url.to_string(),
        })
    }

    /// The page URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the breed page. The status code is not checked.
    pub async fn fetch_breed_page(&self) -> Result<Page, AkcError> {
        Ok(fetch::fetch_page(&self.http_client, &self.url, &[]).await?)
    }
}

/// Returns the raw content of a fetched page.
pub fn extract_content(page: &Page) -> &[u8] {
    &page.content
}

/// Parses a page's content into a queryable HTML document.
///
/// Parsing is best-effort: malformed or truncated markup still yields a
/// document, and invalid UTF-8 is replaced rather than rejected.
pub fn soupify(page: &Page) -> Html {
    Html::parse_document(&String::from_utf8_lossy(extract_content(page)))
}

fn selector(css: &str) -> Result<Selector, AkcError> {
    Selector::parse(css).map_err(|_| AkcError::Selector(css.to_string()))
}

/// Finds the first `<select>` element in the document.
pub fn find_breed_select(document: &Html) -> Result<Option<ElementRef<'_>>, AkcError> {
    let select = selector("select")?;
    Ok(document.select(&select).next())
}

/// Collects every `<option>` nested under `select`, in document order.
pub fn breed_options(select: ElementRef<'_>) -> Result<Vec<BreedOption>, AkcError> {
    let option = selector("option")?;

    Ok(select
        .select(&option)
        .map(|el| {
            let label: String = el.text().collect();
            let value = el
                .value()
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| label.clone());
            BreedOption { label, value }
        })
        .collect())
}

/// Returns `true` if `text` is the prompt option, ignoring case.
///
/// Only the full phrase matches. Surrounding whitespace or extra words make
/// the text a regular option.
pub fn is_placeholder(text: &str) -> bool {
    text.to_lowercase() == PLACEHOLDER
}

/// Option display texts with the prompt option removed.
pub fn filter_placeholder(options: &[BreedOption]) -> Vec<String> {
    options
        .iter()
        .filter(|option| !option.is_placeholder())
        .map(|option| option.label.clone())
        .collect()
}

/// Parses an HTML string and returns the options of its first `<select>`.
pub fn parse_breed_options(html: &str) -> Result<Vec<BreedOption>, AkcError> {
    let document = Html::parse_document(html);
    let select = find_breed_select(&document)?.ok_or(AkcError::SelectNotFound)?;
    breed_options(select)
}
