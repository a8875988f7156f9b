//! Bulk-write suite runner.

use crate::report::{CaseReport, CaseStatus, SuiteReport};
use lipi_core::{HarnessConfig, PageDriver, Result, TimeoutConfig};
use lipi_fixtures::{Suite, VerificationCase};
use lipi_page::{PageAdapter, StabilizationDetector};
use tokio::time::{Instant, sleep};

/// Drives suites of verification cases through a page adapter.
///
/// One logical case holds the session at a time: each case runs to
/// completion, through its cool-down, before the next starts. A case
/// failure is recorded and never aborts the suite; the reset-and-settle at
/// the start of every case is what makes that safe.
pub struct VerificationRunner {
    /// Appearance and finality detection
    detector: StabilizationDetector,
    /// Timing constants
    timeouts: TimeoutConfig,
}

impl VerificationRunner {
    /// Creates a runner from the harness configuration.
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            detector: StabilizationDetector::new(config.timeouts.clone()),
            timeouts: config.timeouts.clone(),
        }
    }

    /// Runs every case of the suite in order, recording each outcome.
    pub async fn run_suite<D: PageDriver>(
        &self,
        page: &PageAdapter<D>,
        suite: &Suite,
    ) -> SuiteReport {
        let mut report = SuiteReport::new(suite.name.clone());
        tracing::info!(suite = %suite.name, cases = suite.len(), "running suite");

        for case in &suite.cases {
            let start = Instant::now();
            let status = match self.run_case(page, case).await {
                Ok(status) => status,
                Err(error) => CaseStatus::from_error(&error),
            };

            match &status {
                CaseStatus::Passed => {
                    tracing::info!(id = %case.id, name = %case.name, "case passed");
                }
                CaseStatus::Mismatch { expected, actual } => {
                    tracing::warn!(
                        id = %case.id,
                        name = %case.name,
                        expected = %expected,
                        actual = %actual,
                        "case failed: output mismatch"
                    );
                }
                CaseStatus::TimedOut { timeout_ms } => {
                    tracing::warn!(
                        id = %case.id,
                        name = %case.name,
                        timeout_ms,
                        "case failed: no output appeared"
                    );
                }
                CaseStatus::DriverError { message } => {
                    tracing::warn!(id = %case.id, name = %case.name, message = %message, "case failed: driver error");
                }
            }

            report.push(CaseReport {
                id: case.id.clone(),
                name: case.name.clone(),
                category: case.category.clone(),
                status,
                elapsed_ms: start.elapsed().as_millis() as u64,
            });

            // decouple the next case's timing from this one
            sleep(self.timeouts.between_cases()).await;
        }

        tracing::info!("{}", report.summary());
        report
    }

    /// Runs one case: reset, bulk write, settle, exact comparison.
    async fn run_case<D: PageDriver>(
        &self,
        page: &PageAdapter<D>,
        case: &VerificationCase,
    ) -> Result<CaseStatus> {
        page.clear_input().await?;
        page.set_input(&case.input).await?;

        let result = self.detector.settle(page, case.expects_empty()).await?;

        // exact string equality: the oracle already encodes the expected
        // whitespace, punctuation, and script mixture
        if result.text == case.expected {
            Ok(CaseStatus::Passed)
        } else {
            Ok(CaseStatus::Mismatch {
                expected: case.expected.clone(),
                actual: result.text,
            })
        }
    }
}
