//! Command-line interface definition.
//!
//! Every flag is optional. With none, the four reference pages in the
//! current directory are checked in headless Chrome.


use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for `sitekit-smoke`
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "sitekit-smoke",
    version,
    about = "Smoke-test static site pages in headless Chrome",
    long_about = "Loads each page of the site in headless Chrome, checks that it has a header\n\
                  and a footer and that its stylesheet applied, and lists any console or page\n\
                  errors. Exits 0 when every page passed, 1 otherwise."
)]
pub struct Cli {
    /// Directory containing the pages [default: .]
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Page to check, relative to the root (repeatable)
    ///
    /// Replaces the default list of index.html, about.html, services.html
    /// and contact.html.
    #[arg(long = "page", value_name = "FILE")]
    pub pages: Vec<String>,

    /// Path to a config file [default: ./sitekit.config.json if present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Chrome or Chromium executable to launch
    #[arg(long = "chrome", value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Per-page navigation timeout in milliseconds [default: 30000]
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Quiet period that counts as network idle, in milliseconds [default: 500]
    #[arg(long, value_name = "MS")]
    pub idle_ms: Option<u64>,

    /// Print the report as JSON on stdout; the progress log moves to stderr
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors to stderr; the check log is still printed
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
