//! Local dataset cache
//!
//! One JSON file per dataset under the configured cache directory. Files
//! hold the endpoint's body verbatim; writes go through a temp file in the
//! same directory and are renamed into place so an interrupted write never
//! leaves a truncated cache behind.

use crate::catalog::Dataset;
use crate::config::CatalogConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cached {dataset} data at {} is corrupt: {source}", path.display())]
    Corrupt {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read/write access to the dataset cache files
#[derive(Debug, Clone, Copy)]
pub struct LocalStore<'a> {
    config: &'a CatalogConfig,
}

impl<'a> LocalStore<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        LocalStore { config }
    }

    pub fn path(&self, dataset: Dataset) -> PathBuf {
        self.config.cache_path(dataset)
    }

    /// Whether a cache file exists for the dataset
    pub fn exists(&self, dataset: Dataset) -> bool {
        self.path(dataset).is_file()
    }

    /// Read and parse a cached dataset
    pub fn read<T: DeserializeOwned>(&self, dataset: Dataset) -> Result<Vec<T>, StoreError> {
        let path = self.path(dataset);
        let data = fs::read(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        serde_json::from_slice(&data).map_err(|source| StoreError::Corrupt {
            dataset,
            path,
            source,
        })
    }

    /// Serialize records and write them as the dataset's cache file
    pub fn write<T: Serialize>(&self, dataset: Dataset, records: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_vec(records)?;
        self.write_raw(dataset, &data)
    }

    /// Write an already-encoded JSON body as the dataset's cache file
    pub fn write_raw(&self, dataset: Dataset, data: &[u8]) -> Result<(), StoreError> {
        let path = self.path(dataset);
        let dir = self.config.cache_dir();

        let io_err = |source: std::io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(data).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&path).map_err(|e| io_err(e.error))?;

        tracing::debug!(%dataset, path = %path.display(), bytes = data.len(), "wrote cache file");
        Ok(())
    }
}
