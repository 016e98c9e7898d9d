//! Chrome process lifecycle.
//!
//! `TestBrowser` launches Chrome, drives its CDP handler on a background task
//! and hands out [`Page`]s. Call [`TestBrowser::close`] when done; dropping
//! the browser without closing it falls back to chromiumoxide's own `Drop`,
//! which kills the process.
//!
//! Each browser gets its own profile directory, removed when the
//! `TestBrowser` is dropped.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::log::EnableParams as EnableLog;
use chromiumoxide::cdp::browser_protocol::network::EnableParams as EnableNetwork;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Configuration for launching a browser.
#[derive(Debug, Clone)]
pub struct TestBrowserConfig {
    /// Run without a window (default: true unless the `visible` feature is on).
    pub headless: bool,

    /// Viewport in pixels; 1920x1080 unless overridden.
    pub window_size: (u32, u32),

    /// Extra command-line switches passed to Chrome.
    pub args: Vec<String>,

    /// Explicit Chrome binary; `None` lets chromiumoxide find one.
    pub chrome_path: Option<PathBuf>,
}

impl TestBrowserConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the browser window.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Uses a specific Chrome/Chromium executable instead of auto-detection.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    fn to_browser_config(&self, profile: &Path) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder().window_size(self.window_size.0, self.window_size.1);

        if !self.headless {
            config = config.with_head();
        }

        // One profile per launch; Chrome's ProcessSingleton lock is per profile.
        config = config.user_data_dir(profile);

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path);
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: !cfg!(feature = "visible"),
            window_size: (1920, 1080),
            args: vec![
                // Containers usually lack the user namespaces Chrome's sandbox needs.
                // Only ever pointed at local static files.
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A managed Chrome instance.
///
/// ```ignore
/// let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
/// let page = browser.new_page().await?;
/// page.navigate("file:///srv/site/index.html").await?;
/// browser.close().await?;
/// ```
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
    // Declared after `inner` so Chrome is gone before its profile is removed.
    profile: TempDir,
}

impl TestBrowser {
    /// Launches Chrome and starts driving its CDP handler.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is missing or fails to start.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        debug!(?config, "launching browser");

        let profile = tempfile::Builder::new()
            .prefix("sitekit-smoke-")
            .tempdir()
            .map_err(|e| BrowserError::LaunchFailed {
                reason: "cannot create a Chrome profile directory".to_string(),
                source: Some(Box::new(e)),
            })?;
        let browser_config = config.to_browser_config(profile.path())?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide only processes CDP traffic while the handler is polled.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler error: {e}");
                }
            }
        });

        debug!("browser launched");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
            profile,
        })
    }

    /// The Chrome profile directory of this browser.
    #[must_use]
    pub fn profile_dir(&self) -> &Path {
        self.profile.path()
    }

    /// Opens a blank tab with console, exception and network tracking attached.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;
        let browser = browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
        chrome_page.execute(EnableNetwork::default()).await?;
        chrome_page.execute(EnableLog::default()).await?;

        Page::attach(chrome_page).await
    }

    /// Shuts Chrome down.
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome does not shut down cleanly.
    pub async fn close(self) -> Result<()> {
        let mut guard = self.inner.lock().await;

        if let Some(mut browser) = guard.take() {
            debug!("closing browser");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
            // The profile directory is removed on drop; Chrome must have let go of it.
            if let Err(e) = browser.wait().await {
                warn!("waiting for Chrome to exit: {e}");
            }
        }

        Ok(())
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        // `close()` empties the slot; anything left here is killed by
        // chromiumoxide's Browser::drop.
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("TestBrowser dropped without close(), killing Chrome");
            }
        }
    }
}
