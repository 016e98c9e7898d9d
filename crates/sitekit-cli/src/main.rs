//! `sitekit-smoke`: checks every page of the site in headless Chrome.
//!
//! Exit status is 0 when every page passed and 1 otherwise, including when
//! the run itself could not complete.

use clap::Parser;
use sitekit_cli::{cli, commands, error, logger, ui};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    match commands::smoke_execute(&args).await {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(err) => {
            eprintln!("Test failed: {:?}", error::cli_error_to_miette(err));
            ExitCode::FAILURE
        }
    }
}
