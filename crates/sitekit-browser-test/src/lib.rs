//! # sitekit-browser-test
//!
//! Headless Chrome smoke tests for a directory of static pages, built on
//! chromiumoxide.
//!
//! ## Architecture
//!
//! - **TestBrowser**: launches Chrome and owns the process
//! - **Page**: a tab with console, exception and network tracking
//! - **ConsoleCapture**: thread-safe accumulation of console messages
//! - **NetworkTracker**: in-flight requests, for network-idle waits
//! - **SiteRoot**: resolves page names to `file://` URLs
//! - **SmokeRunner**: the per-page checks and the run log
//!
//! ## Example
//!
//! ```ignore
//! use sitekit_browser_test::{
//!     NavigateOptions, SiteRoot, SmokeRunner, TestBrowserConfig, run_site_smoke,
//! };
//!
//! let runner = SmokeRunner::reference(SiteRoot::new(".")?);
//! let report = run_site_smoke(
//!     &runner,
//!     TestBrowserConfig::default(),
//!     NavigateOptions::default(),
//!     &mut std::io::stdout(),
//! )
//! .await?;
//! std::process::exit(i32::from(report.exit_code()));
//! ```
//!
//! ## Testing
//!
//! The run logic is tested against a scripted [`PageProbe`]. Tests that
//! need Chrome are `#[ignore]`d; run them with `cargo test -- --ignored`.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod console;
pub mod error;
pub mod network;
pub mod page;
pub mod site;
pub mod smoke;
pub mod wait;

pub use browser::{TestBrowser, TestBrowserConfig};
pub use console::{CapturedError, ConsoleCapture, ConsoleLevel, ConsoleMessage, ErrorKind, MessageOrigin};
pub use error::{BrowserError, Result};
pub use network::NetworkTracker;
pub use page::{DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_NETWORK_IDLE, NavigateOptions, Page};
pub use site::SiteRoot;
pub use smoke::{
    BrowserProbe, PageCheckResult, PageOutcome, PageProbe, PageSnapshot, REFERENCE_PAGES,
    SmokeReport, SmokeRunner, run_site_smoke,
};
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};
