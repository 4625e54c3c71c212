//! Runs the breed source checks against the live services.
//!
//! Prints one line per check and a summary, and exits non-zero if any check
//! failed or errored. Logs go to stderr (`RUST_LOG` or `-v`).
//!
//! Built only with the `cli` feature: `cargo run --features cli -- --help`.

use std::error::Error;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use breedcheck::akc::{self, api::AKC_BREEDS_URL};
use breedcheck::petfinder::{self, api::PETFINDER_BREED_LIST_URL, PetfinderConfig};
use breedcheck::{CheckReport, HttpClientConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Group {
    Akc,
    Petfinder,
    All,
}

/// Check that the AKC and Petfinder breed sources still work
#[derive(Parser, Debug)]
#[command(name = "breedcheck")]
#[command(version)]
#[command(about = "Check that the AKC and Petfinder breed sources still work")]
struct Args {
    /// Which check group to run
    #[arg(short, long, value_enum, default_value_t = Group::All)]
    group: Group,

    /// AKC breed listing page
    #[arg(long, default_value = AKC_BREEDS_URL)]
    akc_url: String,

    /// Petfinder breed list endpoint
    #[arg(long, default_value = PETFINDER_BREED_LIST_URL)]
    petfinder_url: String,

    /// Petfinder API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long)]
    timeout: Option<u64>,

    /// Log requests and per-group summaries
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn http_config(&self) -> HttpClientConfig {
        let config = HttpClientConfig::new();
        match self.timeout {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut report = CheckReport::new();

    if matches!(args.group, Group::Akc | Group::All) {
        let client = akc::Client::with_base_url(&args.akc_url, args.http_config())?;
        report.extend(akc::run_group(&client).await);
    }

    if matches!(args.group, Group::Petfinder | Group::All) {
        let config = PetfinderConfig::new(args.api_key.clone());
        let client =
            petfinder::Client::with_base_url(&args.petfinder_url, config, args.http_config())?;
        report.extend(petfinder::run_group(&client).await);
    }

    println!("{}", report);

    Ok(ExitCode::from(report.exit_code()))
}
