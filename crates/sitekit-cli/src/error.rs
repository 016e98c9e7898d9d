//! Error handling for the smoke-test CLI.
//!
//! - **Top-level errors** (`CliError`) are what commands return
//! - **Configuration errors** (`ConfigError`) carry a hint for the fix
//! - **Browser errors** come from `sitekit-browser-test` and convert via `#[from]`
//!
//! Only failures that stop a run end up here. A page that fails its checks
//! is part of the report, not an error.

pub mod miette;

pub use self::miette::cli_error_to_miette;

use sitekit_browser_test::BrowserError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chrome could not be launched, driven or closed
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// I/O errors, including writes to stdout
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}\n\nHint: Create sitekit.config.json or check the --config path", .0.display())]
    NotFound(PathBuf),

    /// A layer could not be parsed or has the wrong type
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value, or the parser's complaint about it
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
