//! Smoke-test configuration with multi-source loading.
//!
//! Priority: CLI > Environment (`SITEKIT_*`) > `sitekit.config.json` > Defaults

mod defaults;
mod loading;
mod validation;

use serde::{Deserialize, Serialize};
use sitekit_browser_test::{NavigateOptions, TestBrowserConfig};
use std::path::PathBuf;
use std::time::Duration;

pub use defaults::*;
pub use loading::CONFIG_FILE_NAME;

/// Smoke-test configuration, as found in `sitekit.config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SmokeConfig {
    /// Directory containing the pages
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Pages to check, in order, relative to `root`
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,

    /// Run Chrome without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Chrome executable (auto-detected when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Upper bound on loading one page
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Quiet period that counts as network idle
    #[serde(default = "default_network_idle_ms")]
    pub network_idle_ms: u64,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            pages: default_pages(),
            headless: default_headless(),
            chrome_path: None,
            navigation_timeout_ms: default_navigation_timeout_ms(),
            network_idle_ms: default_network_idle_ms(),
        }
    }
}

impl SmokeConfig {
    #[must_use]
    pub fn browser_config(&self) -> TestBrowserConfig {
        let mut config = TestBrowserConfig::default();
        config.headless = self.headless;
        if let Some(path) = &self.chrome_path {
            config = config.with_chrome_path(path);
        }
        config
    }

    #[must_use]
    pub fn navigate_options(&self) -> NavigateOptions {
        NavigateOptions {
            timeout: Duration::from_millis(self.navigation_timeout_ms),
            network_idle: Duration::from_millis(self.network_idle_ms),
        }
    }
}
