//! Polling waits with a deadline.
//!
//! Page readiness and network idle are both "check, sleep, check again"
//! conditions; these helpers own that loop and turn an expired deadline into
//! [`BrowserError::WaitTimeout`].

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Default timeout for wait operations (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default poll interval for checking conditions (50ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Timeout and poll interval for a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitConfig {
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Polls `condition` until it returns true or `config.timeout` expires.
///
/// ```ignore
/// wait_for(|| async { tracker.is_idle(quiet) }, WaitConfig::default(), "network idle").await?;
/// ```
pub async fn wait_for<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let condition = &condition;
    wait_for_result(
        move || async move { Ok::<_, BrowserError>(condition().await) },
        config,
        description,
    )
    .await
}

/// Like [`wait_for`], for conditions that can fail.
///
/// Errors count as "not yet": a script evaluated mid-navigation can fail
/// while the old document is torn down.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        match condition().await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(e) => tracing::trace!("{description}: transient error: {e}"),
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}
