//! Terminal output helpers.
//!
//! Color is decided once by [`init_colors`] and stored in the `console`
//! crate's global switches; everything here consults those switches before
//! emitting ANSI codes.
//!
//! ```no_run
//! use sitekit_cli::ui;
//!
//! ui::init_colors(false);
//! ui::warning("Running a headed browser in CI");
//! ```

mod format;
mod messages;
mod painter;

pub use format::format_duration;
pub use messages::{info, warning};
pub use painter::LogPainter;

/// Check if running in a CI environment.
#[must_use]
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Whether a stream should be colored, given whether it is a terminal.
///
/// `NO_COLOR` wins over `FORCE_COLOR`, which wins over TTY detection.
#[must_use]
pub fn should_use_color(is_terminal: bool) -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    is_terminal
}

/// Decides color for stdout and stderr. `no_color` is the `--no-color` flag.
pub fn init_colors(no_color: bool) {
    let stdout = !no_color && should_use_color(console::Term::stdout().is_term());
    let stderr = !no_color && should_use_color(console::user_attended_stderr());
    console::set_colors_enabled(stdout);
    console::set_colors_enabled_stderr(stderr);
}

/// Whether stdout output may be colored.
#[must_use]
pub fn stdout_colors() -> bool {
    console::colors_enabled()
}

/// Whether stderr output may be colored.
#[must_use]
pub fn stderr_colors() -> bool {
    console::colors_enabled_stderr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_color_env() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_is_ci_with_ci_var() {
        unsafe {
            std::env::set_var("CI", "true");
        }
        assert!(is_ci());
        unsafe {
            std::env::remove_var("CI");
        }
    }

    #[test]
    #[serial]
    fn test_should_use_color_follows_terminal() {
        clear_color_env();
        assert!(should_use_color(true));
        assert!(!should_use_color(false));
    }

    #[test]
    #[serial]
    fn test_should_use_color_force_color() {
        clear_color_env();
        unsafe {
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(should_use_color(false));
        clear_color_env();
    }

    #[test]
    #[serial]
    fn test_should_use_color_no_color_overrides_force() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_color(true));
        clear_color_env();
    }

    #[test]
    #[serial]
    fn test_no_color_flag_disables_both_streams() {
        clear_color_env();
        init_colors(true);
        assert!(!stdout_colors());
        assert!(!stderr_colors());
    }
}
