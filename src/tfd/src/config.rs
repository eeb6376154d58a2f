//! Catalog location settings

use crate::catalog::Dataset;
use std::path::{Path, PathBuf};

/// Static metadata endpoint for the English locale
pub const DEFAULT_BASE_URL: &str = "https://open.api.nexon.com/static/tfd/meta/en";

/// Where datasets are cached and fetched from
///
/// Built once at startup and shared by reference with the store and loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub cache_dir: PathBuf,
    pub base_url: String,
}

impl CatalogConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        CatalogConfig {
            cache_dir: cache_dir.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache file path for a dataset
    pub fn cache_path(&self, dataset: Dataset) -> PathBuf {
        self.cache_dir.join(dataset.file_name())
    }

    /// Remote URL for a dataset
    pub fn url(&self, dataset: Dataset) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            dataset.file_name()
        )
    }
}
