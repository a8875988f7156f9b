//! Deterministic scripted driver for harness tests.
//!
//! Simulates the external transliteration service without a rendered
//! session: scripted responses keyed by full input text, a simulated
//! debounce latency in (virtual) time, and a recorded log of every
//! operation so tests can assert on the exact emitted keystroke sequence.

use async_trait::async_trait;
use lipi_core::{PageDriver, Result, Surface};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// One recorded driver operation with its virtual timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// Session navigated to a URL
    Navigate(String),
    /// Input surface bulk-filled with text
    Fill(String),
    /// Input surface cleared
    Clear,
    /// One keystroke appended
    Press(char),
}

/// Internal mutable state of the mock session.
#[derive(Debug)]
struct MockState {
    /// Current content of the input surface
    buffer: String,
    /// Input snapshots awaiting the simulated debounce, newest last
    pending: Vec<(Instant, String)>,
    /// Latest input whose debounce has matured
    committed: String,
    /// Recorded operations with virtual timestamps
    events: Vec<(Instant, DriverEvent)>,
}

/// Mock driver that plays the role of the rendered transliteration page.
///
/// Cloning shares the underlying state, so tests can keep a handle while
/// the adapter owns the driver. Unscripted inputs echo the romanized text
/// back, modelling a service that always reacts with *something*; an
/// `unresponsive` mock never produces output at all, for timeout paths.
#[derive(Clone)]
pub struct MockPageDriver {
    /// Shared session state
    state: Arc<Mutex<MockState>>,
    /// Scripted full-input to output mappings
    responses: Arc<Mutex<HashMap<String, String>>>,
    /// Simulated debounce/recompute latency
    latency: Duration,
    /// When set, the output surface never carries text
    unresponsive: bool,
}

impl Default for MockPageDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPageDriver {
    /// Creates a mock with the default simulated latency of 500 ms.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                buffer: String::new(),
                pending: Vec::new(),
                committed: String::new(),
                events: Vec::new(),
            })),
            responses: Arc::new(Mutex::new(HashMap::new())),
            latency: Duration::from_millis(500),
            unresponsive: false,
        }
    }

    /// Sets the simulated debounce latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Scripts the output produced once the given full input settles.
    #[must_use]
    pub fn with_response(self, input: impl Into<String>, output: impl Into<String>) -> Self {
        {
            let mut responses = lock(&self.responses);
            responses.insert(input.into(), output.into());
        }
        self
    }

    /// Makes the mock never produce any output, for timeout tests.
    #[must_use]
    pub fn unresponsive(mut self) -> Self {
        self.unresponsive = true;
        self
    }

    /// The simulated debounce latency.
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// All recorded operations, in order.
    #[must_use]
    pub fn events(&self) -> Vec<DriverEvent> {
        let state = lock(&self.state);
        state.events.iter().map(|(_, event)| event.clone()).collect()
    }

    /// All recorded operations with their virtual timestamps.
    #[must_use]
    pub fn timed_events(&self) -> Vec<(Instant, DriverEvent)> {
        let state = lock(&self.state);
        state.events.clone()
    }

    /// Maps a settled input to the text the service would render.
    fn translate(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let responses = lock(&self.responses);
        responses
            .get(input)
            .cloned()
            .unwrap_or_else(|| input.to_owned())
    }

    /// Records a mutation of the input surface.
    fn mutate(&self, event: DriverEvent, new_buffer: String) {
        let now = Instant::now();
        let mut state = lock(&self.state);
        state.buffer.clone_from(&new_buffer);
        state.pending.push((now, new_buffer));
        state.events.push((now, event));
    }

    /// Advances the simulated debounce: the newest pending snapshot older
    /// than the latency becomes the committed input.
    fn refresh_committed(&self) {
        let now = Instant::now();
        let mut state = lock(&self.state);
        let matured = state
            .pending
            .iter()
            .rev()
            .find(|(when, _)| now.duration_since(*when) >= self.latency)
            .map(|(_, snapshot)| snapshot.clone());
        if let Some(snapshot) = matured {
            state.committed = snapshot;
            state
                .pending
                .retain(|(when, _)| now.duration_since(*when) < self.latency);
        }
    }
}

/// Locks a mutex, ignoring poisoning (state stays usable across a panicked
/// test thread).
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl PageDriver for MockPageDriver {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        let now = Instant::now();
        let mut state = lock(&self.state);
        state.events.push((now, DriverEvent::Navigate(url.to_owned())));
        Ok(())
    }

    async fn wait_for_idle(&self) -> Result<()> {
        Ok(())
    }

    async fn fill_input(&self, text: &str) -> Result<()> {
        self.mutate(DriverEvent::Fill(text.to_owned()), text.to_owned());
        Ok(())
    }

    async fn clear_input(&self) -> Result<()> {
        self.mutate(DriverEvent::Clear, String::new());
        Ok(())
    }

    async fn press_input(&self, unit: char) -> Result<()> {
        let appended = {
            let state = lock(&self.state);
            let mut buffer = state.buffer.clone();
            buffer.push(unit);
            buffer
        };
        self.mutate(DriverEvent::Press(unit), appended);
        Ok(())
    }

    async fn output_candidates(&self) -> Result<Vec<Surface>> {
        self.refresh_committed();
        let (buffer, committed) = {
            let state = lock(&self.state);
            (state.buffer.clone(), state.committed.clone())
        };
        let rendered = if self.unresponsive {
            String::new()
        } else {
            self.translate(&committed)
        };
        // the input surface shares the output container class, so the
        // query returns it too; the editable flag is what tells them apart
        Ok(vec![
            Surface::new(buffer, true),
            Surface::new(rendered, false),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_output_lags_behind_input_by_latency() {
        let driver = MockPageDriver::new().with_response("mama", "මම");

        driver.fill_input("mama").await.expect("fill should work");
        let before = driver
            .output_candidates()
            .await
            .expect("query should work");
        assert_eq!(before[1].trimmed(), "", "debounce has not matured yet");

        sleep(driver.latency()).await;
        let after = driver
            .output_candidates()
            .await
            .expect("query should work");
        assert_eq!(after[1].trimmed(), "මම");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_mutations_commit_newest_matured_snapshot() {
        let driver = MockPageDriver::new()
            .with_response("ma", "ම")
            .with_response("mama", "මම");

        driver.fill_input("ma").await.expect("fill should work");
        sleep(Duration::from_millis(200)).await;
        driver.fill_input("mama").await.expect("fill should work");

        // first snapshot matured, second still pending: stale text shows
        sleep(Duration::from_millis(350)).await;
        let stale = driver
            .output_candidates()
            .await
            .expect("query should work");
        assert_eq!(stale[1].trimmed(), "ම");

        sleep(driver.latency()).await;
        let fresh = driver
            .output_candidates()
            .await
            .expect("query should work");
        assert_eq!(fresh[1].trimmed(), "මම");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unscripted_input_echoes() {
        let driver = MockPageDriver::new();
        driver.fill_input("hello").await.expect("fill should work");
        sleep(driver.latency()).await;
        let candidates = driver
            .output_candidates()
            .await
            .expect("query should work");
        assert_eq!(candidates[1].trimmed(), "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresponsive_never_renders() {
        let driver = MockPageDriver::new().unresponsive();
        driver.fill_input("mama").await.expect("fill should work");
        sleep(Duration::from_secs(60)).await;
        let candidates = driver
            .output_candidates()
            .await
            .expect("query should work");
        assert_eq!(candidates[1].trimmed(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_appends_and_records_sequence() {
        let driver = MockPageDriver::new();
        driver.press_input('m').await.expect("press should work");
        driver.press_input('a').await.expect("press should work");

        let events = driver.events();
        assert_eq!(
            events,
            vec![DriverEvent::Press('m'), DriverEvent::Press('a')]
        );

        sleep(driver.latency()).await;
        let candidates = driver
            .output_candidates()
            .await
            .expect("query should work");
        assert_eq!(candidates[0].text, "ma", "input surface holds the buffer");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_resets_buffer_and_output() {
        let driver = MockPageDriver::new();
        driver.fill_input("mama").await.expect("fill should work");
        sleep(driver.latency()).await;
        driver.clear_input().await.expect("clear should work");
        sleep(driver.latency()).await;

        let candidates = driver
            .output_candidates()
            .await
            .expect("query should work");
        assert_eq!(candidates[0].text, "");
        assert_eq!(candidates[1].trimmed(), "");
    }
}
