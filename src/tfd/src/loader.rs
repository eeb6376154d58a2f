//! Cache-or-fetch dataset loading
//!
//! Each dataset is served from the local store when its cache file exists,
//! otherwise it is fetched once and the body is written to the store before
//! being returned. A refresh ignores the cache and re-fetches everything.

use crate::catalog::{Dataset, Module, StatNameMap, StatRecord, Weapon};
use crate::config::CatalogConfig;
use crate::fetch::{FetchError, Fetcher};
use crate::store::{LocalStore, StoreError};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to download {dataset}: {source}")]
    Network {
        dataset: Dataset,
        #[source]
        source: FetchError,
    },

    #[error("Downloaded {dataset} data is not a list of records: {source}")]
    RemoteFormat {
        dataset: Dataset,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// All datasets for one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub weapons: Vec<Weapon>,
    pub stat_names: StatNameMap,
    pub modules: Vec<Module>,
}

impl Catalog {
    /// Weapon names in dataset order, for suggestions
    pub fn weapon_names(&self) -> Vec<String> {
        self.weapons.iter().map(|w| w.weapon_name.clone()).collect()
    }

    /// Module names in dataset order, for suggestions
    pub fn module_names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.module_name.clone()).collect()
    }
}

pub struct DatasetLoader<'a, F> {
    config: &'a CatalogConfig,
    store: LocalStore<'a>,
    fetcher: F,
}

impl<'a, F: Fetcher> DatasetLoader<'a, F> {
    pub fn new(config: &'a CatalogConfig, fetcher: F) -> Self {
        DatasetLoader {
            config,
            store: LocalStore::new(config),
            fetcher,
        }
    }

    /// Load a dataset from cache, fetching and caching it on a miss
    pub fn load<T: DeserializeOwned>(&self, dataset: Dataset) -> Result<Vec<T>, LoadError> {
        if self.store.exists(dataset) {
            tracing::debug!(%dataset, "cache hit");
            return Ok(self.store.read(dataset)?);
        }

        tracing::info!(%dataset, "cache miss, downloading");
        self.fetch_and_cache(dataset)
    }

    /// Fetch a dataset and overwrite its cache file, regardless of cache state
    pub fn fetch_and_cache<T: DeserializeOwned>(
        &self,
        dataset: Dataset,
    ) -> Result<Vec<T>, LoadError> {
        let url = self.config.url(dataset);
        tracing::debug!(%dataset, %url, "fetching");

        let body = self
            .fetcher
            .fetch(&url)
            .map_err(|source| LoadError::Network { dataset, source })?;

        // Validate before touching the cache so a bad response never replaces good data
        let records: Vec<T> = serde_json::from_slice(&body)
            .map_err(|source| LoadError::RemoteFormat { dataset, source })?;

        self.store.write_raw(dataset, &body)?;
        tracing::info!(%dataset, records = records.len(), "cached");

        Ok(records)
    }

    pub fn load_weapons(&self) -> Result<Vec<Weapon>, LoadError> {
        self.load(Dataset::Weapons)
    }

    pub fn load_stat_names(&self) -> Result<StatNameMap, LoadError> {
        let records: Vec<StatRecord> = self.load(Dataset::Stats)?;
        Ok(StatNameMap::from_records(&records))
    }

    pub fn load_modules(&self) -> Result<Vec<Module>, LoadError> {
        self.load(Dataset::Modules)
    }

    /// Load weapons, stats, then modules
    pub fn load_all(&self) -> Result<Catalog, LoadError> {
        let weapons = self.load_weapons()?;
        let stat_names = self.load_stat_names()?;
        let modules = self.load_modules()?;

        Ok(Catalog {
            weapons,
            stat_names,
            modules,
        })
    }

    /// Re-download all three datasets, overwriting every cache file
    pub fn refresh_all(&self) -> Result<Catalog, LoadError> {
        let weapons: Vec<Weapon> = self.fetch_and_cache(Dataset::Weapons)?;
        let stats: Vec<StatRecord> = self.fetch_and_cache(Dataset::Stats)?;
        let modules: Vec<Module> = self.fetch_and_cache(Dataset::Modules)?;

        Ok(Catalog {
            weapons,
            stat_names: StatNameMap::from_records(&stats),
            modules,
        })
    }
}
