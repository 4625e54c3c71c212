//! AKC breed page check group.
//!
//! Fetches <https://www.akc.org/dog-breeds/> once per group run and checks
//! that the page yields a usable breed selector.
//!
//! # Checks
//!
//! | Check | Asserts |
//! |-------|---------|
//! | `reachability` | the page request completed |
//! | `content_presence` | the page content can be extracted, even if empty |
//! | `parseability` | the body parses to an HTML document |
//! | `selector_presence` | the document has a `<select>` |
//! | `non_empty_options` | the select has at least one `<option>` |
//! | `no_placeholder_leakage` | "Select A Breed" is absent once the prompt is filtered |
//!
//! Each check re-parses the stored body; only the fetch is shared.
//!
//! # Example
//!
//! ```
//! use breedcheck::akc::AkcBreedCheck;
//! use breedcheck::Page;
//!
//! let page = Page::new(
//!     "https://www.akc.org/dog-breeds/",
//!     200,
//!     "<select><option>Select a Breed</option><option>Beagle</option></select>",
//! );
//! let group = AkcBreedCheck::from_page(page);
//! assert_eq!(group.breeds().unwrap(), vec!["Beagle"]);
//! ```

pub mod api;

use scraper::Html;

use crate::check::{ensure, CheckError, CheckResult};
use crate::fetch::Page;
use crate::HttpClientConfig;

pub use api::{AkcError, BreedOption, Client};

/// Group name used in reports.
pub const GROUP: &str = "akc";

/// The exact text the leakage check looks for.
///
/// The filter is case-insensitive but this assertion only guards one casing.
pub const LEAKED_PLACEHOLDER: &str = "Select A Breed";

/// A single check over the group fixture.
pub type Check = fn(&AkcBreedCheck) -> Result<(), CheckError>;

/// Every check in run order.
pub const CHECKS: &[(&str, Check)] = &[
    ("reachability", AkcBreedCheck::reachability),
    ("content_presence", AkcBreedCheck::content_presence),
    ("parseability", AkcBreedCheck::parseability),
    ("selector_presence", AkcBreedCheck::selector_presence),
    ("non_empty_options", AkcBreedCheck::non_empty_options),
    ("no_placeholder_leakage", AkcBreedCheck::no_placeholder_leakage),
];

/// The AKC check group with its shared page fixture.
#[derive(Debug, Clone)]
pub struct AkcBreedCheck {
    page: Page,
}

impl AkcBreedCheck {
    /// Fetches the public breed page once.
    pub async fn setup(config: HttpClientConfig) -> Result<Self, AkcError> {
        Self::setup_with(&Client::with_config(config)?).await
    }

    /// Fetches the breed page through an existing client.
    pub async fn setup_with(client: &Client) -> Result<Self, AkcError> {
        let page = client.fetch_breed_page().await?;
        Ok(Self::from_page(page))
    }

    /// Builds the group around an already fetched page.
    pub fn from_page(page: Page) -> Self {
        Self { page }
    }

    /// The shared page fixture.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Parses the stored page. Called afresh by every check.
    pub fn soupify(&self) -> Html {
        api::soupify(&self.page)
    }

    fn options(&self) -> Result<Vec<BreedOption>, CheckError> {
        let document = self.soupify();
        let select = api::find_breed_select(&document)
            .map_err(|e| CheckError::Structure(e.to_string()))?
            .ok_or_else(|| CheckError::Structure(AkcError::SelectNotFound.to_string()))?;
        api::breed_options(select).map_err(|e| CheckError::Structure(e.to_string()))
    }

    /// Breed names from the selector, prompt option removed.
    pub fn breeds(&self) -> Result<Vec<String>, CheckError> {
        Ok(api::filter_placeholder(&self.options()?))
    }

    /// The request completed and produced a page.
    pub fn reachability(&self) -> Result<(), CheckError> {
        tracing::debug!(url = %self.page.url, status = self.page.status, "akc page reachable");
        Ok(())
    }

    /// The page carries content. An empty body still counts as content.
    pub fn content_presence(&self) -> Result<(), CheckError> {
        let content = api::extract_content(&self.page);
        tracing::debug!(bytes = content.len(), "akc content extracted");
        Ok(())
    }

    /// The body parses to a document with a root element.
    pub fn parseability(&self) -> Result<(), CheckError> {
        let document = self.soupify();
        let root = document.root_element().value().name();
        ensure(root == "html", format!("unexpected document root <{}>", root))
    }

    /// The document contains a `<select>`.
    pub fn selector_presence(&self) -> Result<(), CheckError> {
        let document = self.soupify();
        let select = api::find_breed_select(&document)
            .map_err(|e| CheckError::Structure(e.to_string()))?;
        ensure(select.is_some(), "no <select> element in document")
    }

    /// The first `<select>` has at least one `<option>`.
    pub fn non_empty_options(&self) -> Result<(), CheckError> {
        let count = self.options()?.len();
        ensure(count > 0, format!("expected more than 0 options, found {}", count))
    }

    /// The filtered option texts do not contain "Select A Breed".
    pub fn no_placeholder_leakage(&self) -> Result<(), CheckError> {
        let texts = self.breeds()?;
        ensure(
            !texts.iter().any(|text| text == LEAKED_PLACEHOLDER),
            format!("'{}' found in {:?}", LEAKED_PLACEHOLDER, texts),
        )
    }

    /// Runs every check against the stored page.
    pub fn run(&self) -> Vec<CheckResult> {
        let results: Vec<_> = CHECKS
            .iter()
            .map(|(name, check)| CheckResult::new(GROUP, *name, check(self)))
            .collect();

        tracing::info!(
            group = GROUP,
            passed = results.iter().filter(|r| r.outcome.is_passed()).count(),
            total = results.len(),
            "group finished"
        );
        results
    }
}

/// Sets the group up through `client` and runs every check.
///
/// A failed setup marks every check as errored with the setup error.
pub async fn run_group(client: &Client) -> Vec<CheckResult> {
    match AkcBreedCheck::setup_with(client).await {
        Ok(group) => group.run(),
        Err(err) => {
            tracing::warn!(group = GROUP, url = client.url(), error = %err, "group setup failed");
            let message = err.to_string();
            CHECKS
                .iter()
                .map(|(name, _)| {
                    CheckResult::new(GROUP, *name, Err(CheckError::Setup(message.clone())))
                })
                .collect()
        }
    }
}
