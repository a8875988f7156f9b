//! Execution layer of the lipi verification harness.
//!
//! Drives fixture suites through the page adapter and stabilization
//! detector with deterministic pass/fail semantics: case-level failures
//! are recorded, never retried, and never abort the suite. Only session
//! establishment is allowed to abort a run.

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

/// Per-case and per-suite report types.
pub mod report;
/// Bulk-write suite runner.
pub mod runner;
/// Keystroke-level runner for the interactive case.
pub mod typing;

pub use report::{CaseReport, CaseStatus, SuiteReport};
pub use runner::VerificationRunner;
pub use typing::IncrementalTypingRunner;
