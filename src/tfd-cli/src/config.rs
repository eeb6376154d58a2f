//! Configuration management for tfd-search

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tfd::CatalogConfig;

/// Directory name used under the platform's application data location
const APP_DIR_NAME: &str = "dev_tfd_search";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Override for the dataset cache directory
    pub cache_dir: Option<PathBuf>,
    /// Override for the metadata endpoint base URL
    pub base_url: Option<String>,
}

/// Get the application directory
///
/// `%LOCALAPPDATA%\dev_tfd_search` on Windows, `~/.config/dev_tfd_search`
/// everywhere else.
pub fn app_dir() -> Result<PathBuf> {
    let base = if cfg!(windows) {
        dirs::data_local_dir().context("Could not determine local app data directory")?
    } else {
        dirs::home_dir()
            .context("Could not determine home directory")?
            .join(".config")
    };

    Ok(base.join(APP_DIR_NAME))
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(app_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from file, or default if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Resolve the catalog settings for this run
    ///
    /// Command-line values win over the config file, which wins over the
    /// built-in defaults.
    pub fn catalog_config(
        &self,
        cache_dir: Option<PathBuf>,
        base_url: Option<String>,
    ) -> Result<CatalogConfig> {
        let cache_dir = match cache_dir.or_else(|| self.cache_dir.clone()) {
            Some(dir) => dir,
            None => app_dir()?,
        };

        let mut config = CatalogConfig::new(cache_dir);
        if let Some(url) = base_url.or_else(|| self.base_url.clone()) {
            config = config.with_base_url(url);
        }

        Ok(config)
    }
}
