//! Locating page files on disk.

use crate::error::{BrowserError, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// A canonicalized directory of static pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoot {
    root: PathBuf,
}

impl SiteRoot {
    /// # Errors
    ///
    /// Returns `SiteRoot` if the directory does not exist or cannot be read.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let path = root.as_ref();
        let root = path.canonicalize().map_err(|source| BrowserError::SiteRoot {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn page_path(&self, page: &str) -> PathBuf {
        self.root.join(page)
    }

    /// Percent-encoded `file://` URL of a page.
    ///
    /// # Errors
    ///
    /// Returns `PageNotFound` when the page does not exist under the root.
    pub fn page_url(&self, page: &str) -> Result<String> {
        let path = self.page_path(page);
        if !path.is_file() {
            return Err(BrowserError::PageNotFound { path });
        }
        // The root is canonical, so the path is absolute.
        Url::from_file_path(&path)
            .map(String::from)
            .map_err(|()| BrowserError::PageNotFound { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn urls_are_absolute_file_urls() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();

        let site = SiteRoot::new(dir.path()).unwrap();
        let url = site.page_url("index.html").unwrap();

        let expected = dir.path().canonicalize().unwrap().join("index.html");
        assert_eq!(url, Url::from_file_path(&expected).unwrap().as_str());
        assert!(url.starts_with("file:///"));
        assert!(url.ends_with("/index.html"));
    }

    #[test]
    fn reserved_characters_in_the_root_are_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site #2 100%");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("index.html"), "<html></html>").unwrap();

        let url = SiteRoot::new(&root).unwrap().page_url("index.html").unwrap();

        assert!(url.contains("/site%20%232%20100%25/index.html"), "{url}");
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.fragment(), None);
        assert_eq!(
            parsed.to_file_path().unwrap(),
            root.canonicalize().unwrap().join("index.html")
        );
    }

    #[test]
    fn missing_pages_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let site = SiteRoot::new(dir.path()).unwrap();

        let err = site.page_url("about.html").unwrap_err();
        assert!(matches!(err, BrowserError::PageNotFound { path } if path.ends_with("about.html")));
    }

    #[test]
    fn directories_are_not_pages() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("services.html")).unwrap();
        let site = SiteRoot::new(dir.path()).unwrap();

        assert!(site.page_url("services.html").is_err());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteRoot::new(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, BrowserError::SiteRoot { .. }));
    }
}
