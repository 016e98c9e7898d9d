//! Smoke runs against real Chrome.
//!
//! These tests need Chrome/Chromium and are `#[ignore]`d by default.
//! Run with: cargo test --package sitekit-browser-test -- --ignored

use sitekit_browser_test::{
    ErrorKind, NavigateOptions, PageOutcome, SiteRoot, SmokeRunner, TestBrowser,
    TestBrowserConfig, run_site_smoke,
};
use std::fs;
use std::path::Path;
use std::time::Duration;

const STYLE: &str = "body { font-family: 'Inter', sans-serif; }";

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <link rel="stylesheet" href="styles.css">
</head>
<body>
{body}
</body>
</html>"#
    )
}

fn complete_page(title: &str) -> String {
    page(
        title,
        r#"<header class="header"><nav>Home</nav></header>
<main><h1>Hello</h1></main>
<footer class="footer">&copy; Saiteja</footer>"#,
    )
}

fn write_site(dir: &Path, pages: &[(&str, String)]) {
    fs::write(dir.join("styles.css"), STYLE).unwrap();
    for (name, html) in pages {
        fs::write(dir.join(name), html).unwrap();
    }
}

fn quick() -> NavigateOptions {
    NavigateOptions {
        timeout: Duration::from_secs(15),
        network_idle: Duration::from_millis(200),
    }
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn reference_site_passes() {
    let dir = tempfile::tempdir().unwrap();
    write_site(
        dir.path(),
        &[
            ("index.html", complete_page("Home")),
            ("about.html", complete_page("About")),
            ("services.html", complete_page("Services")),
            ("contact.html", complete_page("Contact")),
        ],
    );

    let runner = SmokeRunner::reference(SiteRoot::new(dir.path()).unwrap());
    let mut out = Vec::new();
    let report = run_site_smoke(&runner, TestBrowserConfig::default(), quick(), &mut out)
        .await
        .expect("smoke run");
    let log = String::from_utf8(out).unwrap();

    assert_eq!(report.exit_code(), 0, "{log}");
    assert!(log.contains("  Title: About"));
    assert!(log.contains("✓ CSS loaded successfully"));
    assert!(log.ends_with("✓ All tests passed!\n"));
}

#[tokio::test]
#[ignore]
async fn headerless_page_fails_and_errors_are_captured() {
    let dir = tempfile::tempdir().unwrap();
    let broken = page(
        "Broken",
        r#"<footer class="footer">only a footer</footer>
<script>
    console.error("widget failed");
    document.querySelector('.missing').classList.add('x');
</script>"#,
    );
    write_site(
        dir.path(),
        &[("index.html", complete_page("Home")), ("about.html", broken)],
    );

    let runner = SmokeRunner::new(SiteRoot::new(dir.path()).unwrap(), ["index.html", "about.html"]);
    let mut out = Vec::new();
    let report = run_site_smoke(&runner, TestBrowserConfig::default(), quick(), &mut out)
        .await
        .expect("smoke run");

    assert_eq!(report.exit_code(), 1);
    assert!(report.pages[0].passed);
    assert!(!report.pages[1].passed);
    assert!(
        report
            .errors
            .iter()
            .any(|e| e.kind == ErrorKind::Console && e.message == "widget failed")
    );
    assert!(report.errors.iter().any(|e| e.kind == ErrorKind::Page));
}

#[tokio::test]
#[ignore]
async fn page_reports_structure_and_font() {
    let dir = tempfile::tempdir().unwrap();
    write_site(dir.path(), &[("index.html", complete_page("Home"))]);
    let site = SiteRoot::new(dir.path()).unwrap();

    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");

    page.navigate_with(&site.page_url("index.html").unwrap(), quick())
        .await
        .expect("navigation");

    assert_eq!(page.title().await.unwrap(), "Home");
    assert_eq!(page.count_selector(".header").await.unwrap(), 1);
    assert_eq!(page.count_selector(".sidebar").await.unwrap(), 0);
    assert!(page.computed_font_family("body").await.unwrap().contains("Inter"));
    assert!(page.url().await.unwrap().ends_with("/index.html"));
    assert_eq!(page.network().in_flight(), 0);

    drop(page);
    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn data_url_console_capture() {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");

    let html = "<script>console.error('from data url'); throw new TypeError('bad state');</script>";
    let url = format!("data:text/html,{}", urlencoding::encode(html));
    page.navigate(&url).await.expect("navigation");

    let errors = page.console().drain_errors();
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["Console Error: from data url", "Page Error: bad state"]
    );

    drop(page);
    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn broken_stylesheet_link_is_a_console_error() {
    let dir = tempfile::tempdir().unwrap();
    // No styles.css next to the page.
    fs::write(dir.path().join("index.html"), complete_page("Home")).unwrap();

    let runner = SmokeRunner::new(SiteRoot::new(dir.path()).unwrap(), ["index.html"]);
    let mut out = Vec::new();
    let report = run_site_smoke(&runner, TestBrowserConfig::default(), quick(), &mut out)
        .await
        .expect("smoke run");
    let log = String::from_utf8(out).unwrap();

    assert!(
        log.contains("  - Console Error: Failed to load resource"),
        "{log}"
    );
    assert!(
        report.pages[0]
            .errors
            .iter()
            .any(|e| e.kind == ErrorKind::Console && e.message.contains("ERR_FILE_NOT_FOUND"))
    );
    assert_eq!(report.exit_code(), 0, "a broken link alone does not fail the run");
}

#[tokio::test]
#[ignore]
async fn empty_root_fails_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone");
    assert!(SiteRoot::new(&missing).is_err());

    fs::create_dir(&missing).unwrap();
    let runner = SmokeRunner::reference(SiteRoot::new(&missing).unwrap());
    let mut out = Vec::new();
    let report = run_site_smoke(&runner, TestBrowserConfig::default(), quick(), &mut out)
        .await
        .expect("smoke run");

    assert!(report.pages.iter().all(|p| p.outcome == PageOutcome::NotFound));
    assert_eq!(report.exit_code(), 1);
}
