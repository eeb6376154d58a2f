//! Non-interactive cache refresh

use anyhow::{Context, Result};
use tfd::{CatalogConfig, DatasetLoader, Fetcher};

/// Re-download every dataset into the cache and report what was loaded
pub fn handle<F: Fetcher>(config: &CatalogConfig, fetcher: F) -> Result<()> {
    println!("Refreshing cache...");

    let catalog = DatasetLoader::new(config, fetcher)
        .refresh_all()
        .context("Failed to refresh cache")?;

    println!("Cache refreshed.");
    println!(
        "Loaded {} weapons, {} stats and {} modules into {}",
        catalog.weapons.len(),
        catalog.stat_names.len(),
        catalog.modules.len(),
        config.cache_dir().display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfd::{Dataset, FetchError};

    struct EmptyLists;

    impl Fetcher for EmptyLists {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Ok(b"[]".to_vec())
        }
    }

    struct Unreachable;

    impl Fetcher for Unreachable {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    #[test]
    fn test_refresh_writes_all_datasets() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path().join("cache"));

        handle(&config, EmptyLists).unwrap();

        for dataset in Dataset::ALL {
            assert!(config.cache_path(dataset).is_file());
        }
    }

    #[test]
    fn test_refresh_failure_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::new(temp_dir.path());

        let err = handle(&config, Unreachable).unwrap_err();
        assert!(format!("{:#}", err).contains("503"));
    }
}
