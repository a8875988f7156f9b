//! Surface operations over a [`PageDriver`].
//!
//! The adapter owns the session-level semantics the runners rely on: the
//! fixed post-clear settle that absorbs an in-flight recompute from the
//! previous case, and the negative-predicate candidate filter that keeps
//! the structurally aliased input surface out of output reads.

use lipi_core::{HarnessConfig, PageDriver, Result, TimeoutConfig};
use tokio::time::sleep;

/// Thin capability wrapper around the rendered session.
///
/// All operations touch the shared external session; none are safe to call
/// concurrently from multiple logical cases. Parallel suites need their own
/// adapter bound to their own session.
pub struct PageAdapter<D> {
    /// The rendering collaborator
    driver: D,
    /// Resolved target URL
    url: String,
    /// Timing constants
    timeouts: TimeoutConfig,
}

impl<D: PageDriver> PageAdapter<D> {
    /// Creates an adapter over a driver using the harness configuration.
    #[must_use]
    pub fn new(driver: D, config: &HarnessConfig) -> Self {
        Self {
            driver,
            url: config.target_url(),
            timeouts: config.timeouts.clone(),
        }
    }

    /// The timing constants this adapter was configured with.
    #[must_use]
    pub fn timeouts(&self) -> &TimeoutConfig {
        &self.timeouts
    }

    /// The underlying driver.
    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Consumes the adapter, returning the driver so the session can be
    /// closed.
    #[must_use]
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Establishes a fresh session: navigate, wait for idle, then the
    /// page-load settle.
    ///
    /// # Errors
    ///
    /// Returns [`lipi_core::Error::Navigation`] if the surface is
    /// unreachable within the startup window; fatal for the whole run.
    pub async fn open(&self) -> Result<()> {
        tracing::info!("opening session against {}", self.url);
        self.driver.navigate(&self.url).await?;
        self.driver.wait_for_idle().await?;
        sleep(self.timeouts.page_load()).await;
        Ok(())
    }

    /// Resets the input surface to empty, then waits the fixed post-clear
    /// settle interval.
    ///
    /// The wait is a deliberate fixed delay, not a poll: even a
    /// clear-to-empty can trigger a recompute, and a recompute from the
    /// previous case may still be in flight.
    ///
    /// # Errors
    ///
    /// Returns an error if the input surface cannot be cleared.
    pub async fn clear_input(&self) -> Result<()> {
        self.driver.clear_input().await?;
        sleep(self.timeouts.after_clear()).await;
        Ok(())
    }

    /// Writes the full string atomically (bulk set, not per-character).
    ///
    /// # Errors
    ///
    /// Returns an error if the input surface cannot be written.
    pub async fn set_input(&self, text: &str) -> Result<()> {
        self.driver.fill_input(text).await
    }

    /// Appends one character to the input surface, simulating a keystroke.
    ///
    /// # Errors
    ///
    /// Returns an error if the keystroke cannot be delivered.
    pub async fn send_unit(&self, unit: char) -> Result<()> {
        self.driver.press_input(unit).await
    }

    /// Current trimmed text of the output surface.
    ///
    /// Takes the first candidate that is not itself editable; the candidate
    /// query is deliberately broad (the selector aliases the input's
    /// container), so the editable filter is what identifies the output.
    /// Returns an empty string when no qualifying candidate exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the candidate query fails.
    pub async fn read_output(&self) -> Result<String> {
        let candidates = self.driver.output_candidates().await?;
        Ok(candidates
            .iter()
            .find(|surface| !surface.editable)
            .map_or_else(String::new, |surface| surface.trimmed().to_owned()))
    }

    /// Whether any qualifying candidate currently carries non-empty text.
    ///
    /// This is the appearance predicate polled by the detector.
    ///
    /// # Errors
    ///
    /// Returns an error if the candidate query fails.
    pub async fn output_appeared(&self) -> Result<bool> {
        let candidates = self.driver.output_candidates().await?;
        Ok(candidates
            .iter()
            .any(|surface| !surface.editable && !surface.trimmed().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPageDriver;
    use lipi_core::HarnessConfig;
    use tokio::time::Instant;

    fn fast_config() -> HarnessConfig {
        let mut config = HarnessConfig::new_default();
        config.timeouts.page_load_ms = 10;
        config.timeouts.after_clear_ms = 10;
        config
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_output_skips_editable_candidate() {
        let driver = MockPageDriver::new().with_response("mama", "මම");
        let handle = driver.clone();
        let adapter = PageAdapter::new(driver, &fast_config());

        adapter.set_input("mama").await.expect("fill should work");
        // before the simulated debounce elapses the output is still empty,
        // but the editable input surface already holds text
        assert!(
            !adapter.output_appeared().await.expect("query should work"),
            "editable candidate must not count as appearance"
        );

        sleep(handle.latency()).await;
        assert!(adapter.output_appeared().await.expect("query should work"));
        assert_eq!(
            adapter.read_output().await.expect("read should work"),
            "මම"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_input_applies_fixed_settle() {
        let driver = MockPageDriver::new();
        let adapter = PageAdapter::new(driver, &fast_config());

        let start = Instant::now();
        adapter.clear_input().await.expect("clear should work");
        assert!(
            start.elapsed() >= adapter.timeouts().after_clear(),
            "post-clear settle must be applied"
        );
    }
}
