//! The page smoke test.
//!
//! A run walks a fixed list of pages in order. Each page is navigated,
//! checked for a header and footer container, and probed for a computed body
//! font as evidence that the stylesheet applied. A page that is missing,
//! fails to load, or lacks a header or footer fails; the run continues with
//! the next page either way. Console errors and uncaught exceptions are
//! recorded against the page that produced them, and the summary lists
//! those of the whole run.
//!
//! [`SmokeRunner`] writes the progress log and is generic over
//! [`PageProbe`], so the run logic is exercised without Chrome.
//! [`run_site_smoke`] wires it to a real browser.

use crate::browser::{TestBrowser, TestBrowserConfig};
use crate::console::CapturedError;
use crate::error::{BrowserError, Result};
use crate::page::{NavigateOptions, Page};
use crate::site::SiteRoot;
use async_trait::async_trait;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info, warn};

/// Pages of the reference deployment, in check order.
pub const REFERENCE_PAGES: [&str; 4] = ["index.html", "about.html", "services.html", "contact.html"];

pub const HEADER_SELECTOR: &str = ".header";
pub const FOOTER_SELECTOR: &str = ".footer";

/// What a probe observed on one loaded page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub title: String,
    pub header_count: usize,
    pub footer_count: usize,
    /// Computed `font-family` of `<body>`.
    pub body_font_family: String,
}

impl PageSnapshot {
    #[must_use]
    pub fn has_header(&self) -> bool {
        self.header_count > 0
    }

    #[must_use]
    pub fn has_footer(&self) -> bool {
        self.footer_count > 0
    }

    /// A resolved body font is taken as proof the stylesheet loaded.
    #[must_use]
    pub fn css_applied(&self) -> bool {
        !self.body_font_family.is_empty()
    }
}

/// Loads pages and reports what it saw.
#[async_trait]
pub trait PageProbe: Send {
    /// Navigates to `url`, waits for network idle, and inspects the page.
    async fn visit(&mut self, url: &str) -> Result<PageSnapshot>;

    /// Console and page errors captured since the last call.
    fn take_errors(&mut self) -> Vec<CapturedError>;
}

/// How a single page fared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PageOutcome {
    NotFound,
    LoadFailed { reason: String },
    Loaded(PageSnapshot),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCheckResult {
    pub page: String,
    pub passed: bool,
    #[serde(flatten)]
    pub outcome: PageOutcome,
    /// Errors captured while this page was checked, in arrival order.
    #[serde(rename = "consoleErrors")]
    pub errors: Vec<CapturedError>,
}

impl PageCheckResult {
    #[must_use]
    pub fn new(page: &str, outcome: PageOutcome) -> Self {
        let passed = match &outcome {
            PageOutcome::Loaded(snapshot) => snapshot.has_header() && snapshot.has_footer(),
            PageOutcome::NotFound | PageOutcome::LoadFailed { .. } => false,
        };
        Self {
            page: page.to_string(),
            passed,
            outcome,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<CapturedError>) -> Self {
        self.errors = errors;
        self
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmokeReport {
    pub pages: Vec<PageCheckResult>,
    /// The per-page error lists concatenated in page order.
    pub errors: Vec<CapturedError>,
}

impl SmokeReport {
    /// True when every page passed. Captured errors do not fail a run.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.pages.iter().all(|p| p.passed)
    }

    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.passed())
    }

    pub fn failed_pages(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().filter(|p| !p.passed).map(|p| p.page.as_str())
    }

    /// Writes the `--- Test Results ---` block and the final verdict.
    ///
    /// # Errors
    ///
    /// Returns `Io` if `out` cannot be written.
    pub fn write_summary<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n--- Test Results ---")?;
        if self.errors.is_empty() {
            writeln!(out, "✓ No console errors detected")?;
        } else {
            writeln!(out, "Console/Page Errors:")?;
            for error in &self.errors {
                writeln!(out, "  - {error}")?;
            }
        }

        if self.passed() {
            writeln!(out, "\n✓ All tests passed!")?;
        } else {
            writeln!(out, "\n✗ Some tests failed")?;
        }
        Ok(())
    }
}

/// Checks a list of pages under one site root.
#[derive(Debug, Clone)]
pub struct SmokeRunner {
    site: SiteRoot,
    pages: Vec<String>,
}

impl SmokeRunner {
    pub fn new<I, S>(site: SiteRoot, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            site,
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// The four reference pages.
    #[must_use]
    pub fn reference(site: SiteRoot) -> Self {
        Self::new(site, REFERENCE_PAGES)
    }

    #[must_use]
    pub fn site(&self) -> &SiteRoot {
        &self.site
    }

    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Runs every check and writes the full log, summary included.
    ///
    /// # Errors
    ///
    /// Only failures writing to `out` escape; page failures are recorded.
    pub async fn run<P, W>(&self, probe: &mut P, out: &mut W) -> Result<SmokeReport>
    where
        P: PageProbe + ?Sized,
        W: Write + ?Sized,
    {
        writeln!(out, "Starting website test...")?;
        let report = self.check_pages(probe, out).await?;
        report.write_summary(out)?;
        Ok(report)
    }

    /// Checks each page in order, writing per-page lines but no summary.
    ///
    /// # Errors
    ///
    /// Only failures writing to `out` escape; page failures are recorded.
    pub async fn check_pages<P, W>(&self, probe: &mut P, out: &mut W) -> Result<SmokeReport>
    where
        P: PageProbe + ?Sized,
        W: Write + ?Sized,
    {
        let mut report = SmokeReport::default();

        for page in &self.pages {
            let outcome = self.check_page(probe, out, page).await?;
            let result = PageCheckResult::new(page, outcome).with_errors(probe.take_errors());
            debug!(
                page = %result.page,
                passed = result.passed,
                errors = result.errors.len(),
                "page checked"
            );
            report.errors.extend(result.errors.iter().cloned());
            report.pages.push(result);
        }

        info!(
            pages = report.pages.len(),
            failed = report.failed_pages().count(),
            errors = report.errors.len(),
            "smoke run finished"
        );
        Ok(report)
    }

    async fn check_page<P, W>(&self, probe: &mut P, out: &mut W, page: &str) -> Result<PageOutcome>
    where
        P: PageProbe + ?Sized,
        W: Write + ?Sized,
    {
        let url = match self.site.page_url(page) {
            Ok(url) => url,
            Err(BrowserError::PageNotFound { path }) => {
                debug!(path = %path.display(), "page missing");
                writeln!(out, "✗ {page} not found")?;
                return Ok(PageOutcome::NotFound);
            }
            Err(e) => return Err(e),
        };

        writeln!(out, "\nTesting {page}...")?;

        let snapshot = match probe.visit(&url).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                writeln!(out, "✗ Error loading {page}: {e}")?;
                return Ok(PageOutcome::LoadFailed {
                    reason: e.to_string(),
                });
            }
        };

        writeln!(out, "✓ {page} loaded successfully")?;
        writeln!(out, "  Title: {}", snapshot.title)?;

        if snapshot.has_header() {
            writeln!(out, "  ✓ Header found")?;
        } else {
            writeln!(out, "  ✗ Header missing")?;
        }
        if snapshot.has_footer() {
            writeln!(out, "  ✓ Footer found")?;
        } else {
            writeln!(out, "  ✗ Footer missing")?;
        }
        if snapshot.header_count > 1 || snapshot.footer_count > 1 {
            warn!(
                page,
                headers = snapshot.header_count,
                footers = snapshot.footer_count,
                "page has more than one header or footer"
            );
        }

        if snapshot.css_applied() {
            writeln!(out, "  ✓ CSS loaded successfully")?;
        } else {
            writeln!(out, "  ✗ CSS may not be loaded")?;
        }

        Ok(PageOutcome::Loaded(snapshot))
    }
}

/// [`PageProbe`] backed by one Chrome tab reused across pages.
#[derive(Debug)]
pub struct BrowserProbe {
    page: Page,
    options: NavigateOptions,
}

impl BrowserProbe {
    #[must_use]
    pub fn new(page: Page, options: NavigateOptions) -> Self {
        Self { page, options }
    }
}

#[async_trait]
impl PageProbe for BrowserProbe {
    async fn visit(&mut self, url: &str) -> Result<PageSnapshot> {
        self.page.navigate_with(url, self.options).await?;

        Ok(PageSnapshot {
            title: self.page.title().await?,
            header_count: self.page.count_selector(HEADER_SELECTOR).await?,
            footer_count: self.page.count_selector(FOOTER_SELECTOR).await?,
            body_font_family: self.page.computed_font_family("body").await?,
        })
    }

    fn take_errors(&mut self) -> Vec<CapturedError> {
        self.page.console().drain_errors()
    }
}

/// Launches Chrome, runs every check, and closes Chrome again.
///
/// The browser is closed before the summary is written, whether or not the
/// page loop succeeded.
///
/// # Errors
///
/// Returns an error if Chrome cannot be launched or closed, or if `out`
/// cannot be written. Page failures are part of the report instead.
pub async fn run_site_smoke<W>(
    runner: &SmokeRunner,
    browser_config: TestBrowserConfig,
    options: NavigateOptions,
    out: &mut W,
) -> Result<SmokeReport>
where
    W: Write + ?Sized,
{
    writeln!(out, "Starting website test...")?;

    let browser = TestBrowser::launch(browser_config).await?;
    let checked = match browser.new_page().await {
        Ok(page) => {
            let mut probe = BrowserProbe::new(page, options);
            runner.check_pages(&mut probe, out).await
        }
        Err(e) => Err(e),
    };
    let closed = browser.close().await;

    let report = checked?;
    closed?;
    report.write_summary(out)?;
    Ok(report)
}
