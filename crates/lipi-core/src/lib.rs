//! Core types and traits for the lipi verification harness.
//!
//! This crate provides the error taxonomy, harness configuration, the
//! `PageDriver` boundary to the rendering collaborator, and the shared
//! data types used across the harness crates.

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

/// Harness configuration types.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Trait definition for the rendering collaborator.
pub mod traits;
/// Shared data types for surfaces and stabilization results.
pub mod types;

pub use config::{HarnessConfig, SelectorConfig, TimeoutConfig};
pub use error::{Error, Result};
pub use traits::PageDriver;
pub use types::{StabilizationResult, Surface};
