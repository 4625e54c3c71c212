//! Live checks for the Petfinder breed list API.
//!
//! # Environment Variables
//!
//! | Variable | Required | Description |
//! |----------|----------|-------------|
//! | `API_KEY` | Yes | Petfinder API key |

use std::time::Duration;

use breedcheck::petfinder::{Client, PetfinderBreedCheck, PetfinderConfig};
use breedcheck::HttpClientConfig;
use tokio::sync::OnceCell;

static GROUP: OnceCell<PetfinderBreedCheck> = OnceCell::const_new();

/// Queries the breed list once for every test in this module.
async fn group() -> &'static PetfinderBreedCheck {
    GROUP
        .get_or_init(|| async {
            // Load .env file if present (ignore errors if file doesn't exist)
            let _ = dotenvy::dotenv();

            let client = Client::with_config(
                PetfinderConfig::from_env(),
                HttpClientConfig::new().timeout(Duration::from_secs(30)),
            )
            .expect("Failed to build Petfinder client");

            PetfinderBreedCheck::setup(&client).await
        })
        .await
}

/// Test that the API key is set in the environment.
#[tokio::test]
#[ignore = "requires API_KEY and network access"]
async fn test_api_key_is_set() {
    group().await.credential_present().unwrap();
}

/// Test that the Petfinder API returns content.
#[tokio::test]
#[ignore = "requires API_KEY and network access"]
async fn test_petfinder_returns_content() {
    group().await.reachability().unwrap();
}

/// Test that at least one breed comes back.
#[tokio::test]
#[ignore = "requires API_KEY and network access"]
async fn test_petfinder_breed_count_is_greater_than_zero() {
    let group = group().await;
    group.breed_count().unwrap();
    println!("Found {} breeds", group.breeds().unwrap().len());
}
