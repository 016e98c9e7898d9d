//! Status messages on stderr.

use owo_colors::OwoColorize;

/// Print an info message to stderr.
///
/// ```no_run
/// use sitekit_cli::ui::info;
///
/// info("Checked 4 pages in 2.31s");
/// ```
pub fn info(message: &str) {
    if super::stderr_colors() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {message}");
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if super::stderr_colors() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {message}");
    }
}
