//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! run log (or the JSON report). The default level is `warn` so that a plain
//! run prints nothing beyond the run log.
//!
//! # Verbosity
//!
//! 1. `--verbose`: debug for the sitekit crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`: custom filter
//! 4. Default: warnings for the sitekit crates
//!
//! ```rust,no_run
//! use sitekit_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::warn!("page has two headers");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "sitekit_cli=debug,sitekit_browser_test=debug,sitekit_core=debug";
const QUIET_FILTER: &str = "sitekit_cli=error,sitekit_browser_test=error";
const DEFAULT_FILTER: &str = "sitekit_cli=warn,sitekit_browser_test=warn";

/// Picks the filter for the given flags; `RUST_LOG` only applies when
/// neither flag is set.
#[must_use]
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Like [`init_logger`] with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && console::colors_enabled_stderr())
        .compact();

    // A second call (e.g. from tests sharing a process) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
