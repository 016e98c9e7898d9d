//! Console logging for the browser adapter.

use web_sys::console;

const PREFIX: &str = "[sitekit]";

pub fn debug(message: &str) {
    console::debug_1(&format!("{PREFIX} {message}").into());
}

pub fn warn(message: &str) {
    console::warn_1(&format!("{PREFIX} {message}").into());
}
