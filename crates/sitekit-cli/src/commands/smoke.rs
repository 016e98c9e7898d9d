//! The smoke run.

use crate::cli::Cli;
use crate::config::SmokeConfig;
use crate::error::Result;
use crate::ui::{self, LogPainter};
use sitekit_browser_test::{SiteRoot, SmokeReport, SmokeRunner, run_site_smoke};
use std::io::{self, Write};
use std::time::Instant;
use tracing::debug;

/// Execute the smoke test.
///
/// # Steps
///
/// 1. Load and validate configuration
/// 2. Check every page in headless Chrome, logging as it goes
/// 3. Print the summary (and the JSON report with `--json`)
///
/// # Errors
///
/// Returns errors for invalid configuration, a missing site root, or a
/// browser that cannot be launched. Failing pages are part of the report.
pub async fn execute(args: &Cli) -> Result<SmokeReport> {
    let config = SmokeConfig::load(args)?;
    config.validate()?;
    debug!(?config, "resolved configuration");

    if !config.headless && ui::is_ci() {
        ui::warning("Running a headed browser in CI; drop --headed or set \"headless\": true");
    }

    let runner = SmokeRunner::new(SiteRoot::new(&config.root)?, config.pages.clone());
    let started = Instant::now();

    let report = if args.json {
        let report = run(&runner, &config, LogPainter::new(io::stderr(), ui::stderr_colors())).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        report
    } else {
        run(&runner, &config, LogPainter::new(io::stdout(), ui::stdout_colors())).await?
    };

    if args.verbose {
        ui::info(&format!(
            "Checked {} pages in {}",
            report.pages.len(),
            ui::format_duration(started.elapsed())
        ));
    }
    Ok(report)
}

async fn run<W: Write>(
    runner: &SmokeRunner,
    config: &SmokeConfig,
    mut log: LogPainter<W>,
) -> Result<SmokeReport> {
    let report = run_site_smoke(
        runner,
        config.browser_config(),
        config.navigate_options(),
        &mut log,
    )
    .await;
    log.flush()?;
    Ok(report?)
}
