use crate::config::SmokeConfig;
use crate::error::{ConfigError, Result};
use std::path::{Component, Path};

/// Validate that a page name stays inside the site root.
pub fn validate_page_name(page: &str) -> Result<()> {
    let invalid = |hint: &str| -> Result<()> {
        Err(ConfigError::InvalidValue {
            field: "pages".to_string(),
            value: page.to_string(),
            hint: hint.to_string(),
        }
        .into())
    };

    if page.trim().is_empty() {
        return invalid("Page names cannot be empty");
    }

    let path = Path::new(page);
    if path.is_absolute() {
        return invalid("Pages are relative to the root, e.g. \"about.html\"");
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return invalid("Pages must not leave the root directory");
    }

    Ok(())
}

impl SmokeConfig {
    /// Validate configuration before any browser is launched.
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(ConfigError::MissingField {
                field: "pages".to_string(),
                hint: "List at least one page, e.g. [\"index.html\"]".to_string(),
            }
            .into());
        }
        for page in &self.pages {
            validate_page_name(page)?;
        }

        if !self.root.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "root".to_string(),
                value: self.root.display().to_string(),
                hint: "Must be an existing directory containing the pages".to_string(),
            }
            .into());
        }

        if self.navigation_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "navigationTimeoutMs".to_string(),
                value: "0".to_string(),
                hint: "Must be greater than zero".to_string(),
            }
            .into());
        }

        if self.network_idle_ms >= self.navigation_timeout_ms {
            return Err(ConfigError::InvalidValue {
                field: "networkIdleMs".to_string(),
                value: self.network_idle_ms.to_string(),
                hint: format!(
                    "Must be shorter than navigationTimeoutMs ({}ms)",
                    self.navigation_timeout_ms
                ),
            }
            .into());
        }

        if let Some(chrome) = &self.chrome_path {
            if !chrome.is_file() {
                return Err(ConfigError::InvalidValue {
                    field: "chromePath".to_string(),
                    value: chrome.display().to_string(),
                    hint: "Point at the Chrome/Chromium executable, or omit it to auto-detect"
                        .to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
