//! Error types for browser-driven smoke checks.
//!
//! Failures are split by where they happen: launching Chrome, talking to it
//! over CDP, navigating a page, or locating the site on disk. A page-level
//! failure is recorded by the smoke runner and does not end the run; anything
//! else propagates to the caller.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The main error type for all browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// Usually Chrome/Chromium is not installed or the configured
    /// executable path is wrong.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to open a tab or talk to it over the DevTools protocol.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A wait condition was not satisfied within the timeout.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// The site root directory could not be resolved.
    #[error("site root '{}' is not accessible: {source}", path.display())]
    SiteRoot {
        /// The directory as given
        path: PathBuf,
        /// Why it could not be resolved
        #[source]
        source: std::io::Error,
    },

    /// A page file is missing from the site root.
    #[error("page '{}' not found", path.display())]
    PageNotFound {
        /// Where the page was expected
        path: PathBuf,
    },

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// I/O errors, including failures writing the run log.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
