//! Config file parsing for `~/.config/bookmeta/config.toml`.
//!
//! Use `GoogleBooksProvider::from_config` to build a provider from the loaded
//! config so endpoint and paging settings apply.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1";
pub const DEFAULT_MAX_RESULTS: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub google_books: GoogleBooksConfig,
    #[serde(default)]
    pub plugin: PluginConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleBooksConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

impl Default for GoogleBooksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_results: default_max_results(),
            user_agent: None,
        }
    }
}

/// Settings shared with sibling providers of the same plugin family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Only read by the Comic Vine provider.
    pub comic_vine_api_key: Option<String>,
}

/// Load config from the default path (`~/.config/bookmeta/config.toml`).
/// Falls back to defaults when the file is missing or invalid.
pub fn load_config() -> AppConfig {
    match config_path() {
        Some(path) => load_config_from(&path).unwrap_or_else(|e| {
            tracing::debug!("Using default config ({}): {}", path.display(), e);
            AppConfig::default()
        }),
        None => AppConfig::default(),
    }
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<AppConfig>(&content)?)
}

/// Write config to an explicit path, creating parent directories.
pub fn save_config_to(cfg: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

/// Return the default config file path (for init and show).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("bookmeta");
        p.push("config.toml");
        p
    })
}

/// Set a dot-separated key such as `google_books.max_results`.
pub fn set_key(cfg: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    let parts: Vec<&str> = key.splitn(2, '.').collect();
    match parts.as_slice() {
        ["google_books", sub] => match *sub {
            "base_url" => cfg.google_books.base_url = value.trim_end_matches('/').to_string(),
            "max_results" => {
                cfg.google_books.max_results = value.parse().map_err(|_| invalid())?;
            }
            "user_agent" => cfg.google_books.user_agent = Some(value.to_string()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        },
        ["plugin", "comic_vine_api_key"] => {
            cfg.plugin.comic_vine_api_key = Some(value.to_string()).filter(|v| !v.is_empty());
        }
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
}
