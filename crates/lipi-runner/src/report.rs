//! Typed verdicts for cases and suites.

use lipi_core::Error;
use serde::Serialize;

/// Outcome of a single case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    /// Settled output matched the oracle exactly
    Passed,
    /// Settled output differed from the oracle
    Mismatch {
        /// Literal oracle text
        expected: String,
        /// Literal text actually read
        actual: String,
    },
    /// No qualifying output candidate appeared within the poll bound
    TimedOut {
        /// The bound that was exceeded, in milliseconds
        timeout_ms: u64,
    },
    /// A driver command failed mid-case
    DriverError {
        /// Failure description
        message: String,
    },
}

impl CaseStatus {
    /// Whether this status counts as a pass.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Converts a case-level error into its recorded status.
    ///
    /// Fatal errors never reach this point; they abort the run at the
    /// session boundary.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::StabilizationTimeout { timeout_ms } => Self::TimedOut {
                timeout_ms: *timeout_ms,
            },
            Error::AssertionMismatch { expected, actual } => Self::Mismatch {
                expected: expected.clone(),
                actual: actual.clone(),
            },
            other => Self::DriverError {
                message: other.to_string(),
            },
        }
    }
}

/// Recorded outcome of one case, with identifying metadata.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    /// Case id from the dataset
    pub id: String,
    /// Human label
    pub name: String,
    /// Classification tag
    pub category: String,
    /// Outcome
    pub status: CaseStatus,
    /// Wall-clock time spent on the case, in milliseconds
    pub elapsed_ms: u64,
}

/// All case outcomes for one suite, keyed by suite name.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,
    /// Per-case outcomes in execution order
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    /// Creates an empty report for the named suite.
    #[must_use]
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            cases: Vec::new(),
        }
    }

    /// Appends one case outcome.
    pub fn push(&mut self, case: CaseReport) {
        self.cases.push(case);
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.cases
            .iter()
            .filter(|case| case.status.is_pass())
            .count()
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    /// Total number of cases.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// Whether every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// One-line summary for the run log.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {}/{} passed, {} failed",
            self.suite,
            self.passed(),
            self.total(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(statuses: Vec<CaseStatus>) -> SuiteReport {
        let mut report = SuiteReport::new("sample");
        for (index, status) in statuses.into_iter().enumerate() {
            report.push(CaseReport {
                id: format!("TC_{index}"),
                name: "case".to_owned(),
                category: "test".to_owned(),
                status,
                elapsed_ms: 0,
            });
        }
        report
    }

    #[test]
    fn test_counts_and_summary() {
        let report = report_with(vec![
            CaseStatus::Passed,
            CaseStatus::TimedOut { timeout_ms: 10_000 },
            CaseStatus::Mismatch {
                expected: "මම".to_owned(),
                actual: "ම".to_owned(),
            },
        ]);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.total(), 3);
        assert!(!report.all_passed());
        assert_eq!(report.summary(), "sample: 1/3 passed, 2 failed");
    }

    #[test]
    fn test_from_error_maps_taxonomy() {
        let timeout = Error::StabilizationTimeout { timeout_ms: 10_000 };
        assert_eq!(
            CaseStatus::from_error(&timeout),
            CaseStatus::TimedOut { timeout_ms: 10_000 }
        );

        let mismatch = Error::AssertionMismatch {
            expected: "a1".to_owned(),
            actual: "b2".to_owned(),
        };
        assert_eq!(
            CaseStatus::from_error(&mismatch),
            CaseStatus::Mismatch {
                expected: "a1".to_owned(),
                actual: "b2".to_owned(),
            }
        );

        let driver = Error::Driver("stale element".to_owned());
        assert!(matches!(
            CaseStatus::from_error(&driver),
            CaseStatus::DriverError { .. }
        ));
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let status = CaseStatus::TimedOut { timeout_ms: 10_000 };
        let json = serde_json::to_string(&status).expect("status should serialize");
        assert!(json.contains("\"status\":\"timed_out\""));
    }
}
