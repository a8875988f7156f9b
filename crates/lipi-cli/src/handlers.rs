//! Run orchestration for the lipi binary.

use crate::cli::Cli;
use anyhow::{Context as _, Result};
use lipi_core::HarnessConfig;
use lipi_fixtures::FixtureDataset;
use lipi_page::{PageAdapter, WebDriverPage};
use lipi_runner::{IncrementalTypingRunner, SuiteReport, VerificationRunner};
use std::fs;
use std::process::ExitCode;

/// Executes the harness run described by the command line.
///
/// # Errors
///
/// Returns an error for configuration problems, dataset validation
/// failures, or a session that cannot be established; per-case failures
/// are reported, not returned.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = load_config(&cli)?;
    if let Some(url) = cli.url {
        config.url = url;
    }

    let dataset = FixtureDataset::builtin().context("Failed to load built-in dataset")?;

    if cli.list {
        print_dataset(&dataset);
        return Ok(ExitCode::SUCCESS);
    }

    let driver = WebDriverPage::connect(&cli.webdriver, config.selectors.clone())
        .await
        .context("Failed to establish WebDriver session")?;
    let page = PageAdapter::new(driver, &config);

    // session establishment is the only failure allowed to abort the run
    page.open().await.context("Failed to open target page")?;

    let mut reports: Vec<SuiteReport> = Vec::new();

    let runner = VerificationRunner::new(&config);
    for suite in dataset.suites() {
        if cli.suite.includes(suite.kind) {
            reports.push(runner.run_suite(&page, suite).await);
        }
    }

    if cli.suite.includes_interactive() {
        let typing = IncrementalTypingRunner::new(&config);
        let case_report = typing.run(&page, dataset.interactive()).await;
        let mut suite_report = SuiteReport::new("interactive");
        suite_report.push(case_report);
        reports.push(suite_report);
    }

    if let Err(error) = page.into_driver().close().await {
        tracing::warn!("session close failed: {error}");
    }

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&reports)
            .context("Failed to serialize reports")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!("wrote JSON report to {}", path.display());
    }

    print_summary(&reports);

    let all_passed = reports.iter().all(SuiteReport::all_passed);
    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Loads configuration from the explicit path or the default location.
fn load_config(cli: &Cli) -> Result<HarnessConfig> {
    cli.config.as_ref().map_or_else(
        || HarnessConfig::load_or_create().context("Failed to load config"),
        |path| {
            HarnessConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        },
    )
}

/// Prints the dataset contents.
#[allow(clippy::print_stdout, reason = "Dataset listing output")]
fn print_dataset(dataset: &FixtureDataset) {
    for suite in dataset.suites() {
        println!("{} ({} cases)", suite.name, suite.len());
        for case in &suite.cases {
            println!("  {}  {}  [{}]", case.id, case.name, case.category);
        }
    }
    let interactive = dataset.interactive();
    println!("interactive (1 case)");
    println!(
        "  {}  {}  [{}]",
        interactive.id, interactive.name, interactive.category
    );
}

/// Prints the per-suite summary table and failure details.
#[allow(clippy::print_stdout, reason = "Run summary output")]
fn print_summary(reports: &[SuiteReport]) {
    println!();
    for report in reports {
        println!("{}", report.summary());
        for case in &report.cases {
            if !case.status.is_pass() {
                println!("  FAILED {}  {}  {:?}", case.id, case.name, case.status);
            }
        }
    }
}
