//! Low-level Petfinder breed list client.
//!
//! The `breed.list` endpoint takes the API key as a query parameter and,
//! with `format=json`, answers with an envelope of the form:
//!
//! ```json
//! { "petfinder": { "breeds": { "breed": [ { "$t": "Beagle" } ] } } }
//! ```

use std::env;

use reqwest::Client as HttpClient;
use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::fetch::{self, FetchError, Page};
use crate::HttpClientConfig;

/// The Petfinder breed list endpoint.
pub const PETFINDER_BREED_LIST_URL: &str = "http://api.petfinder.com/breed.list";

/// Environment variable holding the Petfinder API key.
pub const API_KEY_VAR: &str = "API_KEY";

/// Errors that may occur when querying the breed list.
#[derive(Debug, Error)]
pub enum PetfinderError {
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Fetching the breed list failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The body is not JSON or does not have the expected envelope.
    #[error("Unexpected breed list body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Query configuration for the breed list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetfinderConfig {
    /// API key, sent as `key`. Omitted from the query when unset.
    pub api_key: Option<String>,
    /// Animal type, sent as `animal`.
    pub animal: String,
    /// Response format, sent as `format`.
    pub format: String,
}

impl Default for PetfinderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            animal: "dog".to_string(),
            format: "json".to_string(),
        }
    }
}

impl PetfinderConfig {
    /// Creates a dog/json configuration with the given key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Reads the API key from the `API_KEY` environment variable.
    ///
    /// Only entry points should call this; everything below takes the
    /// configuration as a value.
    pub fn from_env() -> Self {
        Self::new(env::var(API_KEY_VAR).ok())
    }

    /// Query parameters for a breed list request.
    pub fn query(&self) -> Vec<(&str, &str)> {
        let mut params = Vec::with_capacity(3);
        if let Some(key) = &self.api_key {
            params.push(("key", key.as_str()));
        }
        params.push(("animal", self.animal.as_str()));
        params.push(("format", self.format.as_str()));
        params
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Top-level breed list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BreedListResponse {
    pub petfinder: PetfinderBody,
}

/// The `petfinder` object of the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PetfinderBody {
    pub breeds: Breeds,
}

/// The `breeds` object of the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Breeds {
    pub breed: OneOrMany<BreedEntry>,
}

/// A JSON value that is either a list or a single bare item.
///
/// The XML-to-JSON conversion behind the v1 API collapses one-element
/// lists into the element itself. Items are decoded one by one so a bad
/// item reports its own error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Flattens into a list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OneOrMany<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<T>, _>>()
                .map(OneOrMany::Many)
                .map_err(D::Error::custom),
            item => serde_json::from_value(item)
                .map(OneOrMany::One)
                .map_err(D::Error::custom),
        }
    }
}

/// A single breed entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BreedEntry {
    /// Raw `$t` value. Entries count whatever it holds, or if it is missing.
    #[serde(rename = "$t", default)]
    pub text: Option<Value>,
}

impl BreedEntry {
    /// Breed name, when `$t` is a string.
    pub fn name(&self) -> Option<&str> {
        self.text.as_ref().and_then(Value::as_str)
    }
}

/// Decodes a breed list body into its entries.
pub fn parse_breed_list(body: &[u8]) -> Result<Vec<BreedEntry>, PetfinderError> {
    let response: BreedListResponse = serde_json::from_slice(body)?;
    Ok(response.petfinder.breeds.breed.into_vec())
}

/// String names of the entries, in order. Other `$t` values are skipped.
pub fn breed_names(entries: &[BreedEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| e.name().map(str::to_string))
        .collect()
}

// =============================================================================
// Client
// =============================================================================

/// Petfinder breed list client.
#[derive(Debug, Clone)]
pub struct Client {
    http_client: HttpClient,
    url: String,
    config: PetfinderConfig,
}

impl Client {
    /// Creates a client for the public breed list endpoint.
    pub fn new(config: PetfinderConfig) -> Result<Self, PetfinderError> {
        Self::with_config(config, HttpClientConfig::default())
    }

    /// Creates a client with custom HTTP configuration.
    pub fn with_config(
        config: PetfinderConfig,
        http_config: HttpClientConfig,
    ) -> Result<Self, PetfinderError> {
        Self::with_base_url(PETFINDER_BREED_LIST_URL, config, http_config)
    }

    /// Creates a client that queries `url` instead of the public endpoint.
    ///
    /// This is primarily useful for testing with mock servers.
    pub fn with_base_url(
        url: &str,
        config: PetfinderConfig,
        http_config: HttpClientConfig,
    ) -> Result<Self, PetfinderError> {
        Ok(Self {
            http_client: http_config.build_client()?,
            url: url.to_string(),
            config,
        })
    }

    /// The endpoint this client queries.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The query configuration.
    pub fn config(&self) -> &PetfinderConfig {
        &self.config
    }

    /// Fetches the raw breed list response. The status code is not checked.
    pub async fn fetch_breed_list_page(&self) -> Result<Page, PetfinderError> {
        let query = self.config.query();
        Ok(fetch::fetch_page(&self.http_client, &self.url, &query).await?)
    }

    /// Fetches and decodes the breed list.
    pub async fn fetch_breed_list(&self) -> Result<Vec<BreedEntry>, PetfinderError> {
        let page = self.fetch_breed_list_page().await?;
        parse_breed_list(&page.content)
    }
}
