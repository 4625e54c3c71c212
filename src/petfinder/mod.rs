//! Petfinder breed list check group.
//!
//! Queries `breed.list` once per group run with `animal=dog&format=json`
//! and checks that an authenticated, non-empty breed array comes back.
//!
//! # Checks
//!
//! | Check | Asserts |
//! |-------|---------|
//! | `credential_present` | an API key was configured |
//! | `reachability` | the request completed |
//! | `breed_count` | `petfinder.breeds.breed` has at least one entry |
//!
//! The credential check only looks at the configuration, so it reports even
//! when the request itself failed. An invalid key is not detected here; it
//! shows up as an upstream error body that fails `breed_count`.
//!
//! # Configuration
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `API_KEY` | Yes | Petfinder API key |
//!
//! The variable is read by [`PetfinderConfig::from_env`], which only the
//! runner binary and live tests call.

pub mod api;

use crate::check::{ensure, CheckError, CheckResult};
use crate::fetch::Page;

pub use api::{BreedEntry, Client, PetfinderConfig, PetfinderError};

/// Group name used in reports.
pub const GROUP: &str = "petfinder";

/// A single check over the group fixture.
pub type Check = fn(&PetfinderBreedCheck) -> Result<(), CheckError>;

/// Every check in run order.
pub const CHECKS: &[(&str, Check)] = &[
    ("credential_present", PetfinderBreedCheck::credential_present),
    ("reachability", PetfinderBreedCheck::reachability),
    ("breed_count", PetfinderBreedCheck::breed_count),
];

/// The Petfinder check group with its shared response fixture.
#[derive(Debug, Clone)]
pub struct PetfinderBreedCheck {
    config: PetfinderConfig,
    response: Result<Page, String>,
}

impl PetfinderBreedCheck {
    /// Queries the breed list once through `client`.
    ///
    /// A failed request does not abort setup; it is stored and reported by
    /// the checks that need the response.
    pub async fn setup(client: &Client) -> Self {
        let response = client.fetch_breed_list_page().await.map_err(|err| {
            tracing::warn!(group = GROUP, url = client.url(), error = %err, "breed list request failed");
            err.to_string()
        });

        Self {
            config: client.config().clone(),
            response,
        }
    }

    /// Builds the group around an already fetched response.
    pub fn from_page(config: PetfinderConfig, page: Page) -> Self {
        Self {
            config,
            response: Ok(page),
        }
    }

    /// The query configuration the group ran with.
    pub fn config(&self) -> &PetfinderConfig {
        &self.config
    }

    fn page(&self) -> Result<&Page, CheckError> {
        self.response
            .as_ref()
            .map_err(|err| CheckError::Setup(err.clone()))
    }

    /// Decodes the stored response into breed entries.
    pub fn entries(&self) -> Result<Vec<BreedEntry>, CheckError> {
        let page = self.page()?;
        api::parse_breed_list(&page.content).map_err(|e| CheckError::Structure(e.to_string()))
    }

    /// Breed names from the stored response.
    pub fn breeds(&self) -> Result<Vec<String>, CheckError> {
        Ok(api::breed_names(&self.entries()?))
    }

    /// An API key was configured.
    pub fn credential_present(&self) -> Result<(), CheckError> {
        ensure(
            self.config.api_key.is_some(),
            format!("{} is not set", api::API_KEY_VAR),
        )
    }

    /// The request completed and produced a response.
    pub fn reachability(&self) -> Result<(), CheckError> {
        let page = self.page()?;
        tracing::debug!(url = %page.url, status = page.status, "petfinder reachable");
        Ok(())
    }

    /// The breed array has at least one entry.
    pub fn breed_count(&self) -> Result<(), CheckError> {
        let count = self.entries()?.len();
        ensure(count > 0, format!("expected more than 0 breeds, found {}", count))
    }

    /// Runs every check against the stored response.
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
pub async fn run_group(client: &Client) -> Vec<CheckResult> {
    PetfinderBreedCheck::setup(client).await.run()
}
