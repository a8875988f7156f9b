use core::result::Result as CoreResult;
use std::io::Error as IoError;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for harness operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur while driving the harness.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The fixture dataset failed load-time validation.
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// The external session could not be established.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A driver command against the rendered session failed.
    #[error("Driver command failed: {0}")]
    Driver(String),

    /// No qualifying output candidate appeared within the poll bound.
    #[error("no output appeared within {timeout_ms} ms")]
    StabilizationTimeout {
        /// The appearance-poll bound that was exceeded, in milliseconds.
        timeout_ms: u64,
    },

    /// The settled output differs from the oracle value.
    #[error("output mismatch: expected {expected:?}, actual {actual:?}")]
    AssertionMismatch {
        /// The oracle text the case expected.
        expected: String,
        /// The text actually read from the output surface.
        actual: String,
    },
}

impl Error {
    /// Determines whether this error aborts the whole run.
    ///
    /// Only session-establishment failure is fatal; everything else is
    /// recorded against the current case and the suite continues.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Navigation(_))
    }

    /// Determines whether this error is a per-case verification failure
    /// rather than an infrastructure problem.
    pub fn is_case_failure(&self) -> bool {
        matches!(
            self,
            Self::StabilizationTimeout { .. } | Self::AssertionMismatch { .. }
        )
    }
}
