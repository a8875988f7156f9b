//! Two-phase convergence detection for the output surface.
//!
//! The service gives no completion signal: a write to the input triggers an
//! unknown-latency, possibly debounced recompute. Reading too early yields
//! stale or empty text; reading too late wastes time. The detector first
//! polls for *appearance* (some qualifying candidate carries non-empty
//! text), then waits a fixed quiescence window before treating the text as
//! *final*. A pure fixed wait risks reading before appearance on slow
//! renders; pure poll-until-no-change risks settling on a recompute that
//! temporarily holds stable intermediate text.

use crate::adapter::PageAdapter;
use lipi_core::{Error, PageDriver, Result, StabilizationResult, TimeoutConfig};
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Polls `check` at a fixed interval until it returns true or the bound
/// elapses. Returns whether the condition was met within the bound.
///
/// Fixed-interval and backoff-free; both durations come from configuration.
///
/// # Errors
///
/// Propagates the first error returned by `check`.
pub async fn await_condition<Check, Fut>(
    mut check: Check,
    poll_interval: Duration,
    timeout: Duration,
) -> Result<bool>
where
    Check: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if check().await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        sleep(poll_interval).await;
    }
}

/// Determines when the output for a just-applied mutation is final.
pub struct StabilizationDetector {
    /// Timing constants
    timeouts: TimeoutConfig,
}

impl StabilizationDetector {
    /// Creates a detector with the given timing constants.
    #[must_use]
    pub fn new(timeouts: TimeoutConfig) -> Self {
        Self { timeouts }
    }

    /// Runs the appearance and finality phases for the mutation just
    /// applied to the input surface, returning the finally-read trimmed
    /// text.
    ///
    /// When `expect_empty` is set the appearance poll is skipped entirely
    /// and only the quiescence window applies: polling for non-empty text
    /// can never succeed for an intentionally empty result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StabilizationTimeout`] if no qualifying candidate
    /// appears within the bound, or any driver error from the polled
    /// queries.
    pub async fn settle<D: PageDriver>(
        &self,
        page: &PageAdapter<D>,
        expect_empty: bool,
    ) -> Result<StabilizationResult> {
        let start = Instant::now();

        if !expect_empty {
            let appeared = await_condition(
                move || page.output_appeared(),
                self.timeouts.poll_interval(),
                self.timeouts.appearance_timeout(),
            )
            .await?;

            if !appeared {
                tracing::warn!(
                    "no output candidate within {} ms",
                    self.timeouts.appearance_timeout_ms
                );
                return Err(Error::StabilizationTimeout {
                    timeout_ms: self.timeouts.appearance_timeout_ms,
                });
            }
            tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "output appeared");
        }

        sleep(self.timeouts.settle()).await;

        let text = page.read_output().await?;
        Ok(StabilizationResult {
            settled: !expect_empty,
            text,
            elapsed: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPageDriver;
    use lipi_core::HarnessConfig;
    use std::cell::Cell;

    fn fast_config() -> HarnessConfig {
        let mut config = HarnessConfig::new_default();
        config.timeouts.page_load_ms = 10;
        config.timeouts.after_clear_ms = 10;
        config.timeouts.settle_ms = 100;
        config.timeouts.appearance_timeout_ms = 2000;
        config.timeouts.poll_interval_ms = 50;
        config
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_condition_met_on_later_iteration() {
        let calls = Cell::new(0u32);
        let met = await_condition(
            || {
                calls.set(calls.get() + 1);
                let ready = calls.get() >= 3;
                async move { Ok(ready) }
            },
            Duration::from_millis(50),
            Duration::from_secs(1),
        )
        .await
        .expect("condition should not error");
        assert!(met);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_condition_times_out() {
        let met = await_condition(
            || async move { Ok(false) },
            Duration::from_millis(50),
            Duration::from_millis(300),
        )
        .await
        .expect("condition should not error");
        assert!(!met);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_returns_final_text() {
        let config = fast_config();
        let driver = MockPageDriver::new().with_response("mama", "මම");
        let adapter = PageAdapter::new(driver, &config);
        let detector = StabilizationDetector::new(config.timeouts.clone());

        adapter.set_input("mama").await.expect("fill should work");
        let result = detector
            .settle(&adapter, false)
            .await
            .expect("settle should succeed");
        assert!(result.settled);
        assert_eq!(result.text, "මම");
        assert!(result.elapsed >= config.timeouts.settle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_times_out_when_service_never_reacts() {
        let config = fast_config();
        let driver = MockPageDriver::new().unresponsive();
        let adapter = PageAdapter::new(driver, &config);
        let detector = StabilizationDetector::new(config.timeouts.clone());

        adapter.set_input("mama").await.expect("fill should work");
        let result = detector.settle(&adapter, false).await;
        assert!(matches!(
            result,
            Err(Error::StabilizationTimeout { timeout_ms: 2000 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_expected_skips_appearance_poll() {
        let config = fast_config();
        // unresponsive: the appearance poll could never succeed
        let driver = MockPageDriver::new().unresponsive();
        let adapter = PageAdapter::new(driver, &config);
        let detector = StabilizationDetector::new(config.timeouts.clone());

        adapter.set_input("").await.expect("fill should work");
        let start = Instant::now();
        let result = detector
            .settle(&adapter, true)
            .await
            .expect("empty fast path must not time out");
        assert!(!result.settled);
        assert_eq!(result.text, "");
        // only the quiescence window, not the appearance bound
        assert!(start.elapsed() < config.timeouts.appearance_timeout());
    }
}
