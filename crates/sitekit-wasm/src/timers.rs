//! `setTimeout`/`setInterval` scheduling.

use crate::dom;
use crate::error::{Result, WasmError};
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Delay in whole milliseconds, saturated to what the browser accepts.
pub fn millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

/// Runs `callback` once after `delay`.
///
/// The closure is freed by wasm-bindgen after it has run.
pub fn set_timeout<F>(delay: Duration, callback: F) -> Result<i32>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(callback);
    dom::window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            millis(delay),
        )
        .map_err(|e| WasmError::dom_with_cause("setTimeout failed", &e))
}

/// Runs `callback` every `period` for the lifetime of the page.
pub fn set_interval<F>(period: Duration, callback: F) -> Result<i32>
where
    F: FnMut() + 'static,
{
    let callback = Closure::<dyn FnMut()>::new(callback);
    let handle = dom::window()?
        .set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis(period),
        )
        .map_err(|e| WasmError::dom_with_cause("setInterval failed", &e))?;
    callback.forget();
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::from_secs(u64::MAX)), i32::MAX);
    }
}
