//! Command-line arguments for the lipi harness.

use clap::{Parser, ValueEnum};
use lipi_fixtures::SuiteKind;
use std::path::PathBuf;

/// Verification harness for an online Singlish-to-Sinhala transliterator.
#[derive(Debug, Parser)]
#[command(name = "lipi", version, about)]
pub struct Cli {
    /// Path to a configuration file (defaults to ~/.lipi/config.toml,
    /// created on first run)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the target URL from configuration
    #[arg(long)]
    pub url: Option<String>,

    /// `WebDriver` endpoint driving the browser session
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver: String,

    /// Which suites to run
    #[arg(long, value_enum, default_value_t = SuiteSelection::All)]
    pub suite: SuiteSelection,

    /// Write the full per-case reports as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// List the dataset cases without opening a session
    #[arg(long)]
    pub list: bool,
}

/// Suite selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SuiteSelection {
    /// Every suite plus the interactive case
    All,
    /// Correct-usage inputs only
    Positive,
    /// Adversarial and malformed inputs only
    Negative,
    /// Boundary and degenerate inputs only
    Edge,
    /// The keystroke-level case only
    Interactive,
}

impl SuiteSelection {
    /// Whether a bulk-write suite of the given kind is selected.
    #[must_use]
    pub fn includes(self, kind: SuiteKind) -> bool {
        match self {
            Self::All => true,
            Self::Positive => kind == SuiteKind::Positive,
            Self::Negative => kind == SuiteKind::Negative,
            Self::Edge => kind == SuiteKind::Edge,
            Self::Interactive => false,
        }
    }

    /// Whether the interactive case is selected.
    #[must_use]
    pub fn includes_interactive(self) -> bool {
        matches!(self, Self::All | Self::Interactive)
    }
}
