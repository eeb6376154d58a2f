//! Configuration command handlers
//!
//! Handles the `configure` subcommand for persisting tfd-search defaults.

use crate::config::{app_dir, Config};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Handle the configure command
///
/// # Arguments
/// * `cache_dir` - Optional cache directory to set as default
/// * `base_url` - Optional metadata base URL to set as default
/// * `show` - If true, show current configuration
pub fn handle(cache_dir: Option<PathBuf>, base_url: Option<String>, show: bool) -> Result<()> {
    handle_at(&Config::config_path()?, cache_dir, base_url, show)
}

fn handle_at(
    path: &Path,
    cache_dir: Option<PathBuf>,
    base_url: Option<String>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load_from(path)?;

    if show {
        show_config(&config, path)?;
        return Ok(());
    }

    if cache_dir.is_none() && base_url.is_none() {
        show_usage();
        return Ok(());
    }

    if let Some(dir) = cache_dir {
        println!("Cache directory configured: {}", dir.display());
        config.cache_dir = Some(dir);
    }
    if let Some(url) = base_url {
        println!("Base URL configured: {}", url);
        config.base_url = Some(url);
    }

    config.save_to(path)?;
    println!("Config saved to: {}", path.display());

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config, path: &Path) -> Result<()> {
    match &config.cache_dir {
        Some(dir) => println!("Cache directory: {}", dir.display()),
        None => println!("Cache directory: {} (default)", app_dir()?.display()),
    }

    match &config.base_url {
        Some(url) => println!("Base URL: {}", url),
        None => println!("Base URL: {} (default)", tfd::DEFAULT_BASE_URL),
    }

    println!("Config file: {}", path.display());

    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: tfd-search configure --set-cache-dir DIR");
    println!("   or: tfd-search configure --set-base-url URL");
    println!("   or: tfd-search configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_values_persist() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        handle_at(&path, Some(PathBuf::from("/srv/tfd")), None, false).unwrap();
        handle_at(&path, None, Some("http://localhost:9000".into()), false).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.cache_dir, Some(PathBuf::from("/srv/tfd")));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_no_values_writes_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        handle_at(&path, None, None, false).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_show_does_not_write() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        handle_at(&path, Some(PathBuf::from("/ignored")), None, true).unwrap();
        assert!(!path.exists());
    }
}
