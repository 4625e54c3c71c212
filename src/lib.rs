//! Health checks for the two upstream sources of dog breed lists.
//!
//! Each source lives in its own module with a low-level `api` client and a
//! check group that fetches once, then runs a fixed set of structural checks
//! over the stored response:
//!
//! - [`akc`]: scrapes the breed `<select>` on the American Kennel Club
//!   breed listing page.
//! - [`petfinder`]: queries the Petfinder `breed.list` JSON endpoint.
//!
//! Parsing is kept separate from fetching, so every check can be driven from
//! a fixture or a mock server. Only the `integration` tests hit the real
//! services.
//!
//! # Example
//!
//! ```no_run
//! use breedcheck::akc::AkcBreedCheck;
//! use breedcheck::HttpClientConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let group = AkcBreedCheck::setup(HttpClientConfig::new()).await?;
//! for breed in group.breeds()? {
//!     println!("{}", breed);
//! }
//! # Ok(())
//! # }
//! ```

use std::net::IpAddr;
use std::time::Duration;

pub mod check;
pub mod fetch;

#[cfg(feature = "akc")]
pub mod akc;

#[cfg(feature = "petfinder")]
pub mod petfinder;

pub use check::{CheckError, CheckOutcome, CheckReport, CheckResult};
pub use fetch::{FetchError, Page};

/// Default `User-Agent` sent by every client.
pub const DEFAULT_USER_AGENT: &str = concat!("breedcheck/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration shared by all source clients.
///
/// Every field is optional. Unset fields leave reqwest's defaults in place,
/// which means no request timeout unless one is configured here.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use breedcheck::HttpClientConfig;
///
/// let config = HttpClientConfig::new().timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Total request timeout.
    pub timeout: Option<Duration>,
    /// Overrides [`DEFAULT_USER_AGENT`].
    pub user_agent: Option<String>,
    /// Local address to bind outgoing connections to.
    pub local_address: Option<IpAddr>,
    /// Network interface to bind outgoing connections to (Unix-like only).
    pub interface: Option<String>,
}

impl HttpClientConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Binds outgoing connections to a local address.
    pub fn local_address(mut self, addr: IpAddr) -> Self {
        self.local_address = Some(addr);
        self
    }

    /// Binds outgoing connections to a network interface.
    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Builds a reqwest client from this configuration.
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let mut builder = reqwest::Client::builder().user_agent(user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(addr) = self.local_address {
            builder = builder.local_address(addr);
        }

        #[cfg(any(
            target_os = "android",
            target_os = "fuchsia",
            target_os = "linux",
            target_os = "macos",
            target_os = "ios",
            target_os = "tvos",
            target_os = "watchos",
            target_os = "illumos",
            target_os = "solaris",
        ))]
        if let Some(ref iface) = self.interface {
            builder = builder.interface(iface);
        }

        builder.build()
    }
}
