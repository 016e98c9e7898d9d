use sitekit_browser_test::{DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_NETWORK_IDLE, REFERENCE_PAGES};
use std::path::PathBuf;

pub fn default_root() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_pages() -> Vec<String> {
    REFERENCE_PAGES.iter().map(ToString::to_string).collect()
}

pub fn default_headless() -> bool {
    true
}

pub fn default_navigation_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_NAVIGATION_TIMEOUT.as_millis()).unwrap_or(u64::MAX)
}

pub fn default_network_idle_ms() -> u64 {
    u64::try_from(DEFAULT_NETWORK_IDLE.as_millis()).unwrap_or(u64::MAX)
}
