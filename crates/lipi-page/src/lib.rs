//! Page access layer for the lipi verification harness.
//!
//! Wraps the rendering collaborator behind [`lipi_core::PageDriver`] and
//! builds the two capabilities the runners need on top of it: the
//! [`PageAdapter`] surface operations and the two-phase
//! [`StabilizationDetector`]. A deterministic [`MockPageDriver`] with
//! simulated debounce latency backs the unit tests; the real session uses
//! the `WebDriver` implementation in [`webdriver`].

#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        reason = "Allow for tests"
    )
)]

/// Surface operations over a page driver.
pub mod adapter;
/// Appearance and finality detection.
pub mod detector;
/// Deterministic scripted driver for tests.
pub mod mock;
/// `WebDriver`-backed driver for live sessions.
pub mod webdriver;

pub use adapter::PageAdapter;
pub use detector::{StabilizationDetector, await_condition};
pub use mock::{DriverEvent, MockPageDriver};
pub use webdriver::WebDriverPage;
