//! Fixture data layer for the lipi verification harness.
//!
//! Pure data, no execution logic: the schema for verification cases, the
//! suite partitioning, and the built-in oracle dataset embedded as JSON.
//! Everything is read-only after load; validation happens once at load
//! time. Keeping the data separate from the runners lets the same
//! execution logic be exercised against synthetic in-memory fixtures in
//! unit tests without a live session.

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

/// Verification case schema.
pub mod case;
/// Dataset loading and validation.
pub mod dataset;
/// Suite partitioning.
pub mod suite;

pub use case::{InteractiveCase, LengthClass, VerificationCase};
pub use dataset::FixtureDataset;
pub use suite::{Suite, SuiteKind};
