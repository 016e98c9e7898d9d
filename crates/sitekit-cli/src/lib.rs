//! Command-line front end for the site smoke test.
//!
//! # Architecture
//!
//! - [`cli`] - argument parsing
//! - [`config`] - layered configuration (defaults, `sitekit.config.json`,
//!   `SITEKIT_*` environment, flags)
//! - [`commands`] - the smoke run itself
//! - [`error`] - error types with actionable hints
//! - [`logger`] - `tracing` setup
//! - [`ui`] - colors and status messages
//!
//! # Example
//!
//! ```rust,no_run
//! use sitekit_cli::{config::SmokeConfig, error::Result};
//!
//! fn main() -> Result<()> {
//!     let config = SmokeConfig::default();
//!     config.validate()?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
