//! lipi - data-driven verification harness for an online
//! Singlish-to-Sinhala transliteration UI.

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

use anyhow::Result;
use clap::Parser as _;
use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod handlers;

/// Initializes the tracing subscriber from `RUST_LOG`, defaulting to
/// harness progress at info level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lipi=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    handlers::run(cli).await
}
