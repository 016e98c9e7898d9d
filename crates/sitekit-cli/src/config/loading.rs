use crate::cli::Cli;
use crate::config::SmokeConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "sitekit.config.json";

const ENV_PREFIX: &str = "SITEKIT_";

/// Variables read after the prefix, e.g. `SITEKIT_NAVIGATION_TIMEOUT_MS`.
const ENV_KEYS: [&str; 6] = [
    "root",
    "pages",
    "headless",
    "chrome_path",
    "navigation_timeout_ms",
    "network_idle_ms",
];

/// Only the flags that were actually given; absent ones leave lower layers alone.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headless: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chrome_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigation_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    network_idle_ms: Option<u64>,
}

impl From<&Cli> for CliOverrides {
    fn from(args: &Cli) -> Self {
        Self {
            root: args.root.clone(),
            pages: (!args.pages.is_empty()).then(|| args.pages.clone()),
            headless: args.headed.then_some(false),
            chrome_path: args.chrome_path.clone(),
            navigation_timeout_ms: args.timeout_ms,
            network_idle_ms: args.idle_ms,
        }
    }
}

impl SmokeConfig {
    /// Load configuration, looking for `sitekit.config.json` in the
    /// working directory.
    pub fn load(args: &Cli) -> Result<Self> {
        Self::load_in(args, Path::new("."))
    }

    /// Load configuration, looking for `sitekit.config.json` in `dir`.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load_in(args: &Cli, dir: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file(args.config.as_deref(), dir)? {
            tracing::debug!(path = %path.display(), "reading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .only(&ENV_KEYS)
                .map(|key| snake_to_camel(key.as_str()).into())
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(CliOverrides::from(args)));

        figment.extract().map_err(|e| {
            let field = if e.path.is_empty() {
                "configuration".to_string()
            } else {
                e.path.join(".")
            };
            ConfigError::InvalidValue {
                field,
                value: e.kind.to_string(),
                hint: format!("Check {CONFIG_FILE_NAME} and any {ENV_PREFIX}* variables"),
            }
            .into()
        })
    }
}

fn config_file(explicit: Option<&Path>, dir: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
        None => {
            let default_path = dir.join(CONFIG_FILE_NAME);
            Ok(default_path.is_file().then_some(default_path))
        }
    }
}

/// `NAVIGATION_TIMEOUT_MS` -> `navigationTimeoutMs`
fn snake_to_camel(key: &str) -> String {
    let mut camel = String::with_capacity(key.len());
    for (i, part) in key.split('_').filter(|p| !p.is_empty()).enumerate() {
        let part = part.to_ascii_lowercase();
        let mut chars = part.chars();
        if i > 0 {
            if let Some(first) = chars.next() {
                camel.push(first.to_ascii_uppercase());
            }
        }
        camel.extend(chars);
    }
    camel
}
