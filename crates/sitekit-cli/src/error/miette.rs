//! Conversion of CLI errors to miette reports.

use crate::error::CliError;
use miette::Report;
use sitekit_browser_test::BrowserError;

/// Convert `CliError` to a miette `Report`, adding hints for common failures.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Browser(e) => browser_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert `BrowserError` to a miette `Report`.
pub fn browser_error_to_miette(err: BrowserError) -> Report {
    match err {
        BrowserError::LaunchFailed { .. } => miette::miette!(
            help = "Install Chrome or Chromium, or pass --chrome <PATH>",
            "{}",
            err
        ),
        BrowserError::SiteRoot { .. } => miette::miette!(
            help = "Point --root (or \"root\" in sitekit.config.json) at the directory holding the pages",
            "{}",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}
