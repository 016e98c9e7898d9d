//! A browser tab with console, exception, browser log and network tracking.

use crate::console::{
    ConsoleCapture, parse_console_event, parse_exception_event, parse_log_entry,
};
use crate::error::{BrowserError, Result};
use crate::network::NetworkTracker;
use crate::wait::{WaitConfig, wait_for, wait_for_result};
use chromiumoxide::cdp::browser_protocol::log::EventEntryAdded;
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::cdp::js_protocol::runtime::{EventConsoleApiCalled, EventExceptionThrown};
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Upper bound on a whole navigation, network idle included.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// How long the network must stay quiet before a page counts as loaded.
pub const DEFAULT_NETWORK_IDLE: Duration = Duration::from_millis(500);

/// How [`Page::navigate_with`] decides a page has finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    pub timeout: Duration,
    pub network_idle: Duration,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_NAVIGATION_TIMEOUT,
            network_idle: DEFAULT_NETWORK_IDLE,
        }
    }
}

/// A browser tab.
///
/// Listener tasks feeding the console capture and network tracker are
/// aborted when the page is dropped.
#[derive(Debug)]
pub struct Page {
    inner: Arc<ChromePage>,
    console: ConsoleCapture,
    network: NetworkTracker,
    listeners: Vec<JoinHandle<()>>,
}

impl Page {
    /// Subscribes to the page's CDP events before handing it out, so nothing
    /// emitted during the first navigation is missed.
    pub(crate) async fn attach(page: ChromePage) -> Result<Self> {
        let mut console_events = page.event_listener::<EventConsoleApiCalled>().await?;
        let mut exception_events = page.event_listener::<EventExceptionThrown>().await?;
        let mut log_events = page.event_listener::<EventEntryAdded>().await?;
        let mut request_events = page.event_listener::<EventRequestWillBeSent>().await?;
        let mut finished_events = page.event_listener::<EventLoadingFinished>().await?;
        let mut failed_events = page.event_listener::<EventLoadingFailed>().await?;

        let console = ConsoleCapture::new();
        let network = NetworkTracker::new();

        let capture = console.clone();
        let console_task = tokio::spawn(async move {
            while let Some(event) = console_events.next().await {
                capture.push(parse_console_event(&event));
            }
        });

        let capture = console.clone();
        let exception_task = tokio::spawn(async move {
            while let Some(event) = exception_events.next().await {
                capture.push(parse_exception_event(&event));
            }
        });

        let capture = console.clone();
        let log_task = tokio::spawn(async move {
            while let Some(event) = log_events.next().await {
                capture.push(parse_log_entry(&event.entry));
            }
        });

        let tracker = network.clone();
        let request_task = tokio::spawn(async move {
            while let Some(event) = request_events.next().await {
                tracker.request_started(event.request_id.inner());
            }
        });

        let tracker = network.clone();
        let finished_task = tokio::spawn(async move {
            while let Some(event) = finished_events.next().await {
                tracker.request_settled(event.request_id.inner());
            }
        });

        let tracker = network.clone();
        let failed_task = tokio::spawn(async move {
            while let Some(event) = failed_events.next().await {
                tracker.request_settled(event.request_id.inner());
            }
        });

        Ok(Self {
            inner: Arc::new(page),
            console,
            network,
            listeners: vec![
                console_task,
                exception_task,
                log_task,
                request_task,
                finished_task,
                failed_task,
            ],
        })
    }

    #[must_use]
    pub fn console(&self) -> &ConsoleCapture {
        &self.console
    }

    #[must_use]
    pub fn network(&self) -> &NetworkTracker {
        &self.network
    }

    /// Navigates with the default 30s timeout and 500ms network-idle window.
    ///
    /// # Errors
    ///
    /// See [`Page::navigate_with`].
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.navigate_with(url, NavigateOptions::default()).await
    }

    /// Navigates to `url` and waits until the document is complete and the
    /// network has been idle for `options.network_idle`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if Chrome rejects the navigation and
    /// `WaitTimeout` if loading does not settle within `options.timeout`.
    pub async fn navigate_with(&self, url: &str, options: NavigateOptions) -> Result<()> {
        debug!(url, ?options, "navigating");
        self.network.reset();

        let wait = WaitConfig::with_timeout(options.timeout);
        let load = async {
            self.inner
                .goto(url)
                .await
                .map_err(|e| BrowserError::NavigationFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
            self.wait_for_load(wait).await?;
            self.wait_for_network_idle(options.network_idle, wait).await
        };

        tokio::time::timeout(options.timeout, load)
            .await
            .map_err(|_| BrowserError::WaitTimeout {
                condition: format!("navigation to '{url}'"),
                timeout: options.timeout,
            })?
    }

    /// Waits for `document.readyState == "complete"`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document never completes.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let state = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(state
                        .value()
                        .and_then(serde_json::Value::as_str)
                        .is_some_and(|s| s == "complete"))
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Waits until no request has been in flight for `quiet_period`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the page keeps loading past `config.timeout`.
    pub async fn wait_for_network_idle(&self, quiet_period: Duration, config: WaitConfig) -> Result<()> {
        wait_for(
            || {
                let tracker = self.network.clone();
                async move { tracker.is_idle(quiet_period) }
            },
            config,
            "network idle",
        )
        .await
    }

    /// Evaluates `script` in the page and deserializes its result.
    ///
    /// ```ignore
    /// let title: String = page.evaluate("document.title").await?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` if the script throws or its result
    /// does not deserialize into `T`.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Number of elements matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` for an invalid selector.
    pub async fn count_selector(&self, selector: &str) -> Result<usize> {
        let selector = js_string(selector)?;
        self.evaluate(&format!("document.querySelectorAll({selector}).length"))
            .await
    }

    /// Computed `font-family` of the first element matching `selector`;
    /// empty when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` for an invalid selector.
    pub async fn computed_font_family(&self, selector: &str) -> Result<String> {
        let selector = js_string(selector)?;
        self.evaluate(&format!(
            "(() => {{ const el = document.querySelector({selector}); \
             return el ? window.getComputedStyle(el).fontFamily : ''; }})()"
        ))
        .await
    }

    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

/// Quotes `value` as a JavaScript string literal.
fn js_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_are_quoted_as_string_literals() {
        assert_eq!(js_string(".header").unwrap(), r#"".header""#);
        assert_eq!(js_string(r#"a[title="x"]"#).unwrap(), r#""a[title=\"x\"]""#);
        assert_eq!(js_string("`x`").unwrap(), r#""`x`""#);
    }

    #[test]
    fn injected_quotes_stay_inside_the_literal() {
        let quoted = js_string("'); alert('xss');//").unwrap();
        assert!(quoted.starts_with('"') && quoted.ends_with('"'));
        assert_eq!(quoted.matches('"').count(), 2);
    }

    #[test]
    fn navigate_defaults() {
        let options = NavigateOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.network_idle, Duration::from_millis(500));
    }
}
