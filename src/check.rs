//! Check-run vocabulary: outcomes, per-check results and the run report.

use std::fmt;

use thiserror::Error;

/// Why a single check did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// An assertion about the fetched data did not hold.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The group fixture could not be built (network failure, bad URL).
    #[error("setup failed: {0}")]
    Setup(String),

    /// The data could not be navigated (missing element, wrong JSON shape).
    #[error("{0}")]
    Structure(String),
}

impl CheckError {
    /// Assertion failures are `Failed`; everything else is `Errored`.
    pub fn outcome(&self) -> CheckOutcome {
        match self {
            CheckError::Assertion(msg) => CheckOutcome::Failed(msg.clone()),
            other => CheckOutcome::Errored(other.to_string()),
        }
    }
}

/// Returns an assertion failure unless `cond` holds.
pub fn ensure(cond: bool, message: impl Into<String>) -> Result<(), CheckError> {
    if cond {
        Ok(())
    } else {
        Err(CheckError::Assertion(message.into()))
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every assertion held.
    Passed,
    /// An assertion did not hold.
    Failed(String),
    /// The check could not run to its assertion.
    Errored(String),
}

impl CheckOutcome {
    /// Returns `true` for [`CheckOutcome::Passed`].
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }
}

impl From<Result<(), CheckError>> for CheckOutcome {
    fn from(result: Result<(), CheckError>) -> Self {
        match result {
            Ok(()) => CheckOutcome::Passed,
            Err(err) => err.outcome(),
        }
    }
}

/// A named check and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Group name, e.g. `akc`.
    pub group: &'static str,
    /// Check name, e.g. `selector_presence`.
    pub name: &'static str,
    /// What the check concluded.
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// Records the result of running `name` in `group`.
    pub fn new(group: &'static str, name: &'static str, result: Result<(), CheckError>) -> Self {
        Self {
            group,
            name,
            outcome: result.into(),
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self.outcome {
            CheckOutcome::Passed => "ok",
            CheckOutcome::Failed(_) => "FAILED",
            CheckOutcome::Errored(_) => "ERROR",
        };
        write!(f, "test {}::{} ... {}", self.group, self.name, status)
    }
}

/// Results of one run across any number of groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    results: Vec<CheckResult>,
}

impl CheckReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends results, keeping their order.
    pub fn extend(&mut self, results: impl IntoIterator<Item = CheckResult>) {
        self.results.extend(results);
    }

    /// All results in run order.
    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Number of passed checks.
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Passed))
    }

    /// Number of failed checks.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Failed(_)))
    }

    /// Number of errored checks.
    pub fn errored(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Errored(_)))
    }

    /// `true` when every check passed. An empty report is a success.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_passed())
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    fn count(&self, pred: impl Fn(&CheckOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "running {} checks", self.results.len())?;
        for result in &self.results {
            writeln!(f, "{}", result)?;
        }

        let problems: Vec<_> = self
            .results
            .iter()
            .filter_map(|r| match &r.outcome {
                CheckOutcome::Passed => None,
                CheckOutcome::Failed(msg) | CheckOutcome::Errored(msg) => Some((r, msg)),
            })
            .collect();

        if !problems.is_empty() {
            writeln!(f)?;
            writeln!(f, "failures:")?;
            for (result, msg) in problems {
                writeln!(f, "---- {}::{} ----", result.group, result.name)?;
                writeln!(f, "{}", msg)?;
            }
        }

        writeln!(f)?;
        write!(
            f,
            "test result: {}. {} passed; {} failed; {} errored",
            if self.is_success() { "ok" } else { "FAILED" },
            self.passed(),
            self.failed(),
            self.errored()
        )
    }
}
