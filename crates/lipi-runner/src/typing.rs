//! Keystroke-level runner for the interactive case.
//!
//! Models the harder real-world path where the output mutates several
//! times before reaching its true final state: the input is emitted one
//! unit at a time with a fixed typing cadence, a weak non-empty invariant
//! is asserted after the partial prefix, and only the true final read is
//! compared against the oracle.

use crate::report::{CaseReport, CaseStatus};
use lipi_core::{HarnessConfig, PageDriver, Result, TimeoutConfig};
use lipi_fixtures::InteractiveCase;
use lipi_page::{PageAdapter, StabilizationDetector};
use tokio::time::{Instant, sleep};

/// Placeholder shown as the expected value when the mid-stream invariant
/// fails; the exact intermediate text is unconstrained.
const NON_EMPTY_PLACEHOLDER: &str = "<any non-empty intermediate output>";

/// Drives a single case by emitting input one unit at a time.
pub struct IncrementalTypingRunner {
    /// Appearance and finality detection, shared protocol with the bulk path
    detector: StabilizationDetector,
    /// Timing constants
    timeouts: TimeoutConfig,
}

impl IncrementalTypingRunner {
    /// Creates a runner from the harness configuration.
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            detector: StabilizationDetector::new(config.timeouts.clone()),
            timeouts: config.timeouts.clone(),
        }
    }

    /// Runs the interactive case and records its outcome.
    pub async fn run<D: PageDriver>(
        &self,
        page: &PageAdapter<D>,
        case: &InteractiveCase,
    ) -> CaseReport {
        tracing::info!(id = %case.id, name = %case.name, "running interactive case");
        let start = Instant::now();

        let status = match self.drive(page, case).await {
            Ok(status) => status,
            Err(error) => CaseStatus::from_error(&error),
        };

        match &status {
            CaseStatus::Passed => {
                tracing::info!(id = %case.id, "interactive case passed");
            }
            other => {
                tracing::warn!(id = %case.id, status = ?other, "interactive case failed");
            }
        }

        sleep(self.timeouts.between_cases()).await;

        CaseReport {
            id: case.id.clone(),
            name: case.name.clone(),
            category: case.category.clone(),
            status,
            elapsed_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// The scripted drive: prefix, mid-stream check, remainder, finality.
    async fn drive<D: PageDriver>(
        &self,
        page: &PageAdapter<D>,
        case: &InteractiveCase,
    ) -> Result<CaseStatus> {
        page.clear_input().await?;

        self.type_units(page, &case.partial_input).await?;
        sleep(self.timeouts.partial_settle()).await;

        // weak invariant: the service reacted with *something*; the exact
        // partial text is unconstrained
        let intermediate = page.read_output().await?;
        if intermediate.is_empty() {
            return Ok(CaseStatus::Mismatch {
                expected: NON_EMPTY_PLACEHOLDER.to_owned(),
                actual: String::new(),
            });
        }
        tracing::debug!(intermediate = %intermediate, "mid-stream output present");

        self.type_units(page, case.remainder()).await?;

        let result = self.detector.settle(page, false).await?;
        if result.text == case.expected_final {
            Ok(CaseStatus::Passed)
        } else {
            Ok(CaseStatus::Mismatch {
                expected: case.expected_final.clone(),
                actual: result.text,
            })
        }
    }

    /// Emits each character as one keystroke followed by the fixed typing
    /// delay: an explicit ordered sequence of (emit, sleep) steps.
    async fn type_units<D: PageDriver>(&self, page: &PageAdapter<D>, units: &str) -> Result<()> {
        for unit in units.chars() {
            page.send_unit(unit).await?;
            sleep(self.timeouts.keystroke_delay()).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipi_fixtures::LengthClass;
    use lipi_page::{DriverEvent, MockPageDriver};

    const FULL_INPUT: &str = "mama dhaen gedhara inne";
    const FINAL_ORACLE: &str = "මම දැන් ගෙදර ඉන්නේ";

    fn interactive_case() -> InteractiveCase {
        InteractiveCase {
            id: "Neg_UI_0001".to_owned(),
            name: "rapid continuous typing".to_owned(),
            input: FULL_INPUT.to_owned(),
            partial_input: "mama dhaen".to_owned(),
            expected_final: FINAL_ORACLE.to_owned(),
            category: "Usability".to_owned(),
            grammar: "Mixed sentence".to_owned(),
            length: LengthClass::Medium,
        }
    }

    fn adapter(driver: MockPageDriver) -> PageAdapter<MockPageDriver> {
        PageAdapter::new(driver, &HarnessConfig::new_default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_path_passes_with_final_oracle() {
        // the prefix settles to its echo (non-empty), the full input to the
        // scripted final text
        let driver = MockPageDriver::new().with_response(FULL_INPUT, FINAL_ORACLE);
        let handle = driver.clone();
        let page = adapter(driver);
        let runner = IncrementalTypingRunner::new(&HarnessConfig::new_default());

        let report = runner.run(&page, &interactive_case()).await;
        assert!(report.status.is_pass(), "{report:?}");

        // every character of the full input was emitted as a keystroke,
        // none as a bulk fill
        let events = handle.events();
        let pressed: String = events
            .iter()
            .filter_map(|event| match event {
                DriverEvent::Press(unit) => Some(*unit),
                DriverEvent::Navigate(_) | DriverEvent::Fill(_) | DriverEvent::Clear => None,
            })
            .collect();
        assert_eq!(pressed, FULL_INPUT);
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, DriverEvent::Fill(_))),
            "interactive path must not bulk-fill"
        );

        // keystrokes follow the fixed typing cadence
        let config = HarnessConfig::new_default();
        let press_times: Vec<_> = handle
            .timed_events()
            .into_iter()
            .filter(|(_, event)| matches!(event, DriverEvent::Press(_)))
            .map(|(when, _)| when)
            .collect();
        for pair in press_times.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= config.timeouts.keystroke_delay());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mid_stream_silence_is_a_failure() {
        let driver = MockPageDriver::new().unresponsive();
        let page = adapter(driver);
        let runner = IncrementalTypingRunner::new(&HarnessConfig::new_default());

        let report = runner.run(&page, &interactive_case()).await;
        assert_eq!(
            report.status,
            CaseStatus::Mismatch {
                expected: NON_EMPTY_PLACEHOLDER.to_owned(),
                actual: String::new(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_final_output_is_a_mismatch() {
        // service never recomputes past the prefix: the final read returns
        // the stale intermediate echo, which must not match the oracle
        let driver = MockPageDriver::new().with_response(FULL_INPUT, "මම දැන්");
        let page = adapter(driver);
        let runner = IncrementalTypingRunner::new(&HarnessConfig::new_default());

        let report = runner.run(&page, &interactive_case()).await;
        assert_eq!(
            report.status,
            CaseStatus::Mismatch {
                expected: FINAL_ORACLE.to_owned(),
                actual: "මම දැන්".to_owned(),
            }
        );
    }
}
